//! The project comments screen: project header, comments, empty state.

use std::sync::Arc;

use super::RowView;
use crate::error::ListIndexError;
use crate::models::{Comment, Project, User};
use crate::sections::{BindError, SectionRow, SectionedAdapter, SectionedList, ViewHolder};

pub const SECTION_PROJECT: usize = 0;
pub const SECTION_COMMENTS: usize = 1;
pub const SECTION_EMPTY: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum CommentsRow {
    Project(Project),
    Comment(Comment),
    /// Shown when there are no comments; wording depends on the viewer.
    Empty { logged_in: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentsLayout {
    ProjectContext,
    Comment,
    EmptyState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentsAction {
    Project(Project),
    Login,
}

pub type CommentsDelegate = Arc<dyn Fn(CommentsAction) + Send + Sync>;

pub struct CommentsAdapter {
    list: SectionedList<CommentsRow>,
    delegate: Option<CommentsDelegate>,
}

impl Default for CommentsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentsAdapter {
    pub fn new() -> Self {
        Self {
            list: SectionedList::new(),
            delegate: None,
        }
    }

    pub fn with_delegate(mut self, delegate: CommentsDelegate) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Replace the whole screen.
    ///
    /// `viewer` is the logged-in user, if any; it only affects the empty state.
    pub fn take_project_and_comments(&mut self, project: Project, comments: Vec<Comment>, viewer: Option<&User>) {
        let empty = if comments.is_empty() {
            vec![CommentsRow::Empty {
                logged_in: viewer.is_some(),
            }]
        } else {
            Vec::new()
        };

        self.list.clear_sections();
        self.list.add_sections([
            vec![CommentsRow::Project(project)],
            comments.into_iter().map(CommentsRow::Comment).collect(),
            empty,
        ]);
        self.list.notify_data_changed();
    }
}

impl SectionedAdapter for CommentsAdapter {
    type Item = CommentsRow;
    type Layout = CommentsLayout;
    type View = RowView;
    type Holder = CommentsViewHolder;

    fn list(&self) -> &SectionedList<CommentsRow> {
        &self.list
    }

    fn layout_for(&self, section_row: SectionRow) -> Result<CommentsLayout, ListIndexError> {
        Ok(match self.list.object_from_section_row(section_row)? {
            CommentsRow::Project(_) => CommentsLayout::ProjectContext,
            CommentsRow::Comment(_) => CommentsLayout::Comment,
            CommentsRow::Empty { .. } => CommentsLayout::EmptyState,
        })
    }

    fn view_holder_for(&self, layout: CommentsLayout, view: RowView) -> CommentsViewHolder {
        CommentsViewHolder {
            layout,
            view,
            action: None,
            delegate: self.delegate.clone(),
        }
    }
}

pub struct CommentsViewHolder {
    layout: CommentsLayout,
    view: RowView,
    action: Option<CommentsAction>,
    delegate: Option<CommentsDelegate>,
}

impl CommentsViewHolder {
    pub fn layout(&self) -> CommentsLayout {
        self.layout
    }

    pub fn view(&self) -> &RowView {
        &self.view
    }

    pub fn click(&self) -> bool {
        match (&self.delegate, &self.action) {
            (Some(delegate), Some(action)) => {
                delegate(action.clone());
                true
            }
            _ => false,
        }
    }
}

impl ViewHolder for CommentsViewHolder {
    type Item = CommentsRow;

    fn bind_data(&mut self, row: &CommentsRow) -> Result<(), BindError> {
        match (self.layout, row) {
            (CommentsLayout::ProjectContext, CommentsRow::Project(project)) => {
                self.view.set(project.name.clone(), Some("Comments".to_string()));
                self.action = Some(CommentsAction::Project(project.clone()));
            }
            (CommentsLayout::Comment, CommentsRow::Comment(comment)) => {
                let body = if comment.is_deleted() {
                    "This comment has been removed.".to_string()
                } else {
                    comment.body.clone()
                };
                self.view.set(comment.author.name.clone(), Some(body));
                self.action = None;
            }
            (CommentsLayout::EmptyState, CommentsRow::Empty { logged_in }) => {
                if *logged_in {
                    self.view.set("No comments yet", Some("Be the first to comment".to_string()));
                    self.action = None;
                } else {
                    self.view.set("No comments yet", Some("Log in to leave a comment".to_string()));
                    self.action = Some(CommentsAction::Login);
                }
            }
            (layout, other) => {
                return Err(BindError::UnexpectedItem {
                    holder: "CommentsViewHolder",
                    found: format!("{:?} for layout {:?}", other, layout),
                })
            }
        }
        Ok(())
    }
}
