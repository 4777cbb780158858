use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Project, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Backing,
    Cancellation,
    Failure,
    Follow,
    Launch,
    Success,
    Suspension,
    Update,
    Watch,
    #[serde(other)]
    Unknown,
}

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub category: ActivityCategory,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub user: Option<User>,
    pub created_at: DateTime<Utc>,
}

/// A page of activities plus the link to the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEnvelope {
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub urls: Option<ActivityUrls>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityUrls {
    pub api: ActivityApiUrls,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityApiUrls {
    #[serde(default)]
    pub more_activities: Option<String>,
}
