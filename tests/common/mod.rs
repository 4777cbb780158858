//! Common test utilities for integration tests.
//!
//! Model fixtures, canned JSON bodies and mock transport setup.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use chrono::{TimeZone, Utc};

use backer::models::{Activity, ActivityCategory, Project, ProjectState, SurveyResponse, User};

pub const TEST_BASE_URL: &str = "https://api.test.local";

pub fn test_user() -> User {
    User {
        id: 42,
        name: "Test Backer".to_string(),
        avatar: None,
    }
}

pub fn test_project(id: u64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        slug: None,
        state: ProjectState::Live,
    }
}

pub fn test_activity(id: u64, category: ActivityCategory) -> Activity {
    Activity {
        id,
        category,
        project: Some(test_project(id, &format!("Project {}", id))),
        user: Some(test_user()),
        created_at: Utc.with_ymd_and_hms(2016, 1, 12, 10, 0, 0).unwrap(),
    }
}

pub fn test_survey(id: u64) -> SurveyResponse {
    SurveyResponse {
        id,
        project: test_project(id, "Surveyed Project"),
    }
}

/// An activities page body holding `ids`, all launch activities.
pub fn activities_page_json(ids: &[u64]) -> String {
    let activities: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "category": "launch",
                "project": {"id": id, "name": format!("Project {}", id), "state": "live"},
                "created_at": "2016-01-12T10:00:00Z",
            })
        })
        .collect();
    serde_json::json!({ "activities": activities }).to_string()
}

pub fn activities_url(page: u32) -> String {
    format!("{}/v1/activities?page={}", TEST_BASE_URL, page)
}
