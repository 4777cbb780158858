use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Started,
    Submitted,
    Live,
    Successful,
    Failed,
    Canceled,
    Suspended,
    Purged,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub state: ProjectState,
}

impl Project {
    pub fn is_live(&self) -> bool {
        self.state == ProjectState::Live
    }
}
