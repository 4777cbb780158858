//! Screen adapters built on [`crate::sections`].
//!
//! Each screen keeps its row content as a closed enum and picks layouts with
//! an exhaustive `match`, so a new row kind cannot be forgotten.

pub mod activity_feed;
pub mod comments;

pub use activity_feed::{
    ActivityFeedAction, ActivityFeedAdapter, ActivityFeedLayout, ActivityFeedRow,
    ActivityFeedViewHolder,
};
pub use comments::{CommentsAction, CommentsAdapter, CommentsLayout, CommentsRow, CommentsViewHolder};

/// The presentation state a view holder writes into.
///
/// Stands in for a platform view: whatever draws the list reads these
/// fields after binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowView {
    pub title: String,
    pub subtitle: Option<String>,
}

impl RowView {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, title: impl Into<String>, subtitle: Option<String>) {
        self.title = title.into();
        self.subtitle = subtitle;
    }
}

impl std::fmt::Display for RowView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subtitle {
            Some(subtitle) => write!(f, "{} - {}", self.title, subtitle),
            None => write!(f, "{}", self.title),
        }
    }
}
