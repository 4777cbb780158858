//! Backend models consumed by screens and adapters.

mod activity;
mod comment;
mod project;
mod survey;
mod user;

pub use activity::{Activity, ActivityApiUrls, ActivityCategory, ActivityEnvelope, ActivityUrls};
pub use comment::{Comment, CommentsEnvelope};
pub use project::{Project, ProjectState};
pub use survey::SurveyResponse;
pub use user::{Avatar, User};
