//! The activity feed screen.
//!
//! Five sections, in order:
//!
//! | section | content                         |
//! |---------|---------------------------------|
//! | 0       | logged-in empty state (0 or 1)  |
//! | 1       | logged-out empty state (0 or 1) |
//! | 2       | surveys header (0 or 1)         |
//! | 3       | unanswered surveys              |
//! | 4       | activities                      |

use std::sync::Arc;

use super::RowView;
use crate::error::ListIndexError;
use crate::models::{Activity, ActivityCategory, Project, SurveyResponse, User};
use crate::sections::{BindError, SectionRow, SectionedAdapter, SectionedList, ViewHolder};

pub const SECTION_LOGGED_IN_EMPTY: usize = 0;
pub const SECTION_LOGGED_OUT_EMPTY: usize = 1;
pub const SECTION_SURVEYS_HEADER: usize = 2;
pub const SECTION_SURVEYS: usize = 3;
pub const SECTION_ACTIVITIES: usize = 4;
const SECTION_COUNT: usize = 5;

/// Row content of the activity feed.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityFeedRow {
    LoggedInEmpty,
    LoggedOutEmpty,
    /// Number of unanswered surveys.
    SurveysHeader(usize),
    Survey(SurveyResponse),
    Activity(Activity),
}

impl ActivityFeedRow {
    fn kind(&self) -> &'static str {
        match self {
            ActivityFeedRow::LoggedInEmpty => "logged-in empty state",
            ActivityFeedRow::LoggedOutEmpty => "logged-out empty state",
            ActivityFeedRow::SurveysHeader(_) => "surveys header",
            ActivityFeedRow::Survey(_) => "survey",
            ActivityFeedRow::Activity(_) => "activity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityFeedLayout {
    LoggedInEmptyState,
    LoggedOutEmptyState,
    SurveysHeader,
    Survey,
    FriendBacking,
    FriendFollow,
    ProjectState,
    ProjectUpdate,
    /// Activities this screen does not show.
    Empty,
}

impl ActivityFeedLayout {
    pub fn for_category(category: ActivityCategory) -> Self {
        match category {
            ActivityCategory::Backing => ActivityFeedLayout::FriendBacking,
            ActivityCategory::Follow => ActivityFeedLayout::FriendFollow,
            ActivityCategory::Cancellation
            | ActivityCategory::Failure
            | ActivityCategory::Launch
            | ActivityCategory::Success
            | ActivityCategory::Suspension => ActivityFeedLayout::ProjectState,
            ActivityCategory::Update => ActivityFeedLayout::ProjectUpdate,
            ActivityCategory::Watch | ActivityCategory::Unknown => ActivityFeedLayout::Empty,
        }
    }
}

/// What a tap on a feed row asks the screen to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityFeedAction {
    Discover,
    Login,
    Surveys,
    Survey(SurveyResponse),
    FriendBacking(Activity),
    Friend(User),
    Project(Project),
    ProjectUpdate(Activity),
}

/// Receives row taps.
pub type ActivityFeedDelegate = Arc<dyn Fn(ActivityFeedAction) + Send + Sync>;

pub struct ActivityFeedAdapter {
    list: SectionedList<ActivityFeedRow>,
    delegate: Option<ActivityFeedDelegate>,
}

impl Default for ActivityFeedAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActivityFeedAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityFeedAdapter")
            .field("list", &self.list)
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}

impl ActivityFeedAdapter {
    /// An adapter with all five sections present and empty.
    pub fn new() -> Self {
        let mut list = SectionedList::new();
        list.add_sections((0..SECTION_COUNT).map(|_| Vec::new()));
        Self {
            list,
            delegate: None,
        }
    }

    pub fn with_delegate(mut self, delegate: ActivityFeedDelegate) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn show_logged_in_empty_state(&mut self, show: bool) {
        let rows = if show {
            vec![ActivityFeedRow::LoggedInEmpty]
        } else {
            Vec::new()
        };
        self.replace(SECTION_LOGGED_IN_EMPTY, rows);
        self.list.notify_data_changed();
    }

    pub fn show_logged_out_empty_state(&mut self, show: bool) {
        let rows = if show {
            vec![ActivityFeedRow::LoggedOutEmpty]
        } else {
            Vec::new()
        };
        self.replace(SECTION_LOGGED_OUT_EMPTY, rows);
        self.list.notify_data_changed();
    }

    pub fn take_activities(&mut self, activities: Vec<Activity>) {
        let rows = activities.into_iter().map(ActivityFeedRow::Activity).collect();
        self.replace(SECTION_ACTIVITIES, rows);
        self.list.notify_data_changed();
    }

    /// Show the unanswered surveys; the header only appears when there are any.
    pub fn take_surveys(&mut self, surveys: Vec<SurveyResponse>) {
        let header = if surveys.is_empty() {
            Vec::new()
        } else {
            vec![ActivityFeedRow::SurveysHeader(surveys.len())]
        };
        self.replace(SECTION_SURVEYS_HEADER, header);
        self.replace(
            SECTION_SURVEYS,
            surveys.into_iter().map(ActivityFeedRow::Survey).collect(),
        );
        self.list.notify_data_changed();
    }

    // The five sections exist from construction on.
    fn replace(&mut self, section: usize, rows: Vec<ActivityFeedRow>) {
        self.list.sections_mut()[section] = rows;
    }
}

impl SectionedAdapter for ActivityFeedAdapter {
    type Item = ActivityFeedRow;
    type Layout = ActivityFeedLayout;
    type View = RowView;
    type Holder = ActivityFeedViewHolder;

    fn list(&self) -> &SectionedList<ActivityFeedRow> {
        &self.list
    }

    fn layout_for(&self, section_row: SectionRow) -> Result<ActivityFeedLayout, ListIndexError> {
        let layout = match self.list.object_from_section_row(section_row)? {
            ActivityFeedRow::LoggedInEmpty => ActivityFeedLayout::LoggedInEmptyState,
            ActivityFeedRow::LoggedOutEmpty => ActivityFeedLayout::LoggedOutEmptyState,
            ActivityFeedRow::SurveysHeader(_) => ActivityFeedLayout::SurveysHeader,
            ActivityFeedRow::Survey(_) => ActivityFeedLayout::Survey,
            ActivityFeedRow::Activity(activity) => ActivityFeedLayout::for_category(activity.category),
        };
        Ok(layout)
    }

    fn view_holder_for(&self, layout: ActivityFeedLayout, view: RowView) -> ActivityFeedViewHolder {
        ActivityFeedViewHolder {
            layout,
            view,
            bound: None,
            delegate: self.delegate.clone(),
        }
    }
}

/// Renders one activity feed row into a [`RowView`].
pub struct ActivityFeedViewHolder {
    layout: ActivityFeedLayout,
    view: RowView,
    bound: Option<ActivityFeedRow>,
    delegate: Option<ActivityFeedDelegate>,
}

impl std::fmt::Debug for ActivityFeedViewHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityFeedViewHolder")
            .field("layout", &self.layout)
            .field("view", &self.view)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

impl ActivityFeedViewHolder {
    pub fn layout(&self) -> ActivityFeedLayout {
        self.layout
    }

    pub fn view(&self) -> &RowView {
        &self.view
    }

    /// Forward a tap on this row to the delegate.
    ///
    /// Returns false when nothing is bound, the row is not tappable or
    /// no delegate is set.
    pub fn click(&self) -> bool {
        let (Some(delegate), Some(action)) = (&self.delegate, self.action()) else {
            return false;
        };
        delegate(action);
        true
    }

    fn action(&self) -> Option<ActivityFeedAction> {
        let action = match self.bound.as_ref()? {
            ActivityFeedRow::LoggedInEmpty => ActivityFeedAction::Discover,
            ActivityFeedRow::LoggedOutEmpty => ActivityFeedAction::Login,
            ActivityFeedRow::SurveysHeader(_) => ActivityFeedAction::Surveys,
            ActivityFeedRow::Survey(survey) => ActivityFeedAction::Survey(survey.clone()),
            ActivityFeedRow::Activity(activity) => match self.layout {
                ActivityFeedLayout::FriendBacking => ActivityFeedAction::FriendBacking(activity.clone()),
                ActivityFeedLayout::FriendFollow => ActivityFeedAction::Friend(activity.user.clone()?),
                ActivityFeedLayout::ProjectState => ActivityFeedAction::Project(activity.project.clone()?),
                ActivityFeedLayout::ProjectUpdate => ActivityFeedAction::ProjectUpdate(activity.clone()),
                _ => return None,
            },
        };
        Some(action)
    }

    fn unexpected(&self, row: &ActivityFeedRow) -> BindError {
        BindError::UnexpectedItem {
            holder: "ActivityFeedViewHolder",
            found: format!("{} for layout {:?}", row.kind(), self.layout),
        }
    }
}

impl ViewHolder for ActivityFeedViewHolder {
    type Item = ActivityFeedRow;

    fn bind_data(&mut self, row: &ActivityFeedRow) -> Result<(), BindError> {
        use ActivityFeedLayout as L;

        match (self.layout, row) {
            (L::LoggedInEmptyState, ActivityFeedRow::LoggedInEmpty) => self.view.set(
                "No activity yet",
                Some("Back a project to follow its story here".to_string()),
            ),
            (L::LoggedOutEmptyState, ActivityFeedRow::LoggedOutEmpty) => self.view.set(
                "Log in to see your activity",
                Some("Updates from projects you back and people you follow".to_string()),
            ),
            (L::SurveysHeader, ActivityFeedRow::SurveysHeader(count)) => {
                let noun = if *count == 1 { "survey" } else { "surveys" };
                self.view
                    .set(format!("You have {} {} to answer", count, noun), None)
            }
            (L::Survey, ActivityFeedRow::Survey(survey)) => self.view.set(
                survey.project.name.clone(),
                Some("Survey waiting for your answers".to_string()),
            ),
            (layout, ActivityFeedRow::Activity(activity))
                if layout == ActivityFeedLayout::for_category(activity.category) =>
            {
                let (title, subtitle) = describe_activity(activity);
                self.view.set(title, subtitle);
            }
            _ => return Err(self.unexpected(row)),
        }

        self.bound = Some(row.clone());
        Ok(())
    }
}

fn describe_activity(activity: &Activity) -> (String, Option<String>) {
    let user = activity
        .user
        .as_ref()
        .map(|user| user.name.as_str())
        .unwrap_or("Someone");
    let project = activity
        .project
        .as_ref()
        .map(|project| project.name.as_str())
        .unwrap_or("a project");

    let title = match activity.category {
        ActivityCategory::Backing => format!("{} backed {}", user, project),
        ActivityCategory::Follow => format!("{} is following you", user),
        ActivityCategory::Launch => format!("{} launched", project),
        ActivityCategory::Success => format!("{} was successfully funded", project),
        ActivityCategory::Failure => format!("{} was not funded", project),
        ActivityCategory::Cancellation => format!("{} was canceled", project),
        ActivityCategory::Suspension => format!("{} was suspended", project),
        ActivityCategory::Update => format!("New update from {}", project),
        ActivityCategory::Watch | ActivityCategory::Unknown => String::new(),
    };
    let subtitle = Some(activity.created_at.format("%b %-d, %Y").to_string());
    (title, subtitle)
}
