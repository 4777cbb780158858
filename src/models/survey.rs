use serde::{Deserialize, Serialize};

use super::Project;

/// A backer survey the current user has not answered yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: u64,
    pub project: Project,
}
