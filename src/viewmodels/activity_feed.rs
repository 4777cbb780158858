//! Activity feed view-model.
//!
//! Each [`refresh`](ActivityFeedViewModel::refresh) starts a new pagination
//! run: page 1 is fetched immediately and every
//! [`next_page`](ActivityFeedViewModel::next_page) fetches the page after the
//! last one requested. API errors leave the feed as it was and are published
//! on [`errors`](ActivityFeedViewModel::errors); transport and decode failures
//! go to [`failures`](ActivityFeedViewModel::failures).

use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::sync::{mpsc, watch};

use super::{receiver_stream, watch_stream};
use crate::api::ApiClient;
use crate::error::{ClientError, ErrorEnvelope};
use crate::models::Activity;
use crate::scheduler::UiScheduler;
use crate::subscriptions::Subscriptions;
use crate::traits::HttpClient;
use crate::transformers::{
    incremental_count, never_error_with, observe_for_ui, pipe_api_errors_to, take_pair_when,
    ObserveForUi,
};

/// Everything the feed screen renders.
#[derive(Debug, Clone, Default, PartialEq)]
struct FeedState {
    activities: Vec<Activity>,
    logged_in: bool,
    loaded: bool,
}

/// Drives the activity feed screen.
///
/// Must be created inside a tokio runtime; the pipeline runs as a task owned
/// by the view-model and stops when it is dropped.
pub struct ActivityFeedViewModel {
    refresh_tx: mpsc::UnboundedSender<mpsc::UnboundedReceiver<()>>,
    next_page_tx: mpsc::UnboundedSender<()>,
    state: watch::Receiver<FeedState>,
    errors: Option<mpsc::UnboundedReceiver<ErrorEnvelope>>,
    failures: Option<mpsc::UnboundedReceiver<ClientError>>,
    scheduler: UiScheduler,
    _subscriptions: Subscriptions,
}

impl ActivityFeedViewModel {
    pub fn new<H: HttpClient + 'static>(api: ApiClient<H>, scheduler: UiScheduler) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(FeedState::default());

        // The user at the moment of each refresh decides which empty state applies.
        let users = watch_stream(api.session().observe());
        let runs = take_pair_when(users, receiver_stream(refresh_rx));
        let states = runs.flat_map(move |(user, next_pages)| {
            let sinks = (errors_tx.clone(), failures_tx.clone());
            feed_pages(api.clone(), sinks, user.is_some(), next_pages)
        });

        let mut subscriptions = Subscriptions::new();
        subscriptions.subscribe(states, move |state: FeedState| {
            tracing::debug!(
                activities = state.activities.len(),
                logged_in = state.logged_in,
                "activity feed updated"
            );
            state_tx.send_replace(state);
        });

        // Replaced by the first refresh.
        let (next_page_tx, _) = mpsc::unbounded_channel();

        let mut view_model = Self {
            refresh_tx,
            next_page_tx,
            state,
            errors: Some(errors_rx),
            failures: Some(failures_rx),
            scheduler,
            _subscriptions: subscriptions,
        };
        view_model.refresh();
        view_model
    }

    /// Reload from the first page.
    pub fn refresh(&mut self) {
        let (next_page_tx, next_page_rx) = mpsc::unbounded_channel();
        // Dropping the previous sender ends the previous run.
        self.next_page_tx = next_page_tx;
        if self.refresh_tx.send(next_page_rx).is_err() {
            tracing::warn!("activity feed pipeline stopped, refresh ignored");
        }
    }

    /// Load the page after the last one requested.
    pub fn next_page(&self) {
        if self.next_page_tx.send(()).is_err() {
            tracing::warn!("activity feed pipeline stopped, next page ignored");
        }
    }

    /// The accumulated activities, once the first page has loaded.
    pub fn activities(&self) -> ObserveForUi<BoxStream<'static, Vec<Activity>>> {
        let activities = watch_stream(self.state.clone())
            .filter(|state| future::ready(state.loaded))
            .map(|state| state.activities)
            .boxed();
        observe_for_ui(activities, self.scheduler.clone())
    }

    /// True while a loaded feed is empty and nobody is logged in.
    pub fn logged_out_empty_state(&self) -> ObserveForUi<BoxStream<'static, bool>> {
        self.empty_state(false)
    }

    /// True while a loaded feed is empty for a logged-in user.
    pub fn logged_in_empty_state(&self) -> ObserveForUi<BoxStream<'static, bool>> {
        self.empty_state(true)
    }

    /// API errors from any page request. Can be taken once.
    pub fn errors(&mut self) -> Option<ObserveForUi<BoxStream<'static, ErrorEnvelope>>> {
        let errors = receiver_stream(self.errors.take()?).boxed();
        Some(observe_for_ui(errors, self.scheduler.clone()))
    }

    /// Requests that failed without an API error body, such as a refused
    /// connection or an undecodable page. Can be taken once.
    pub fn failures(&mut self) -> Option<ObserveForUi<BoxStream<'static, ClientError>>> {
        let failures = receiver_stream(self.failures.take()?).boxed();
        Some(observe_for_ui(failures, self.scheduler.clone()))
    }

    fn empty_state(&self, logged_in: bool) -> ObserveForUi<BoxStream<'static, bool>> {
        let shown = watch_stream(self.state.clone())
            .map(move |state| state.loaded && state.activities.is_empty() && state.logged_in == logged_in)
            .boxed();
        observe_for_ui(shown, self.scheduler.clone())
    }
}

impl std::fmt::Debug for ActivityFeedViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityFeedViewModel")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// One pagination run: page 1 now, then one page per `next_pages` signal.
fn feed_pages<H: HttpClient + 'static>(
    api: ApiClient<H>,
    (errors, failures): (mpsc::UnboundedSender<ErrorEnvelope>, mpsc::UnboundedSender<ClientError>),
    logged_in: bool,
    next_pages: mpsc::UnboundedReceiver<()>,
) -> impl Stream<Item = FeedState> {
    let pages = incremental_count(
        stream::once(future::ready(())).chain(receiver_stream(next_pages)),
        1,
    );

    pages
        .flat_map(move |page| {
            let responses = pipe_api_errors_to(api.fetch_activities(page), errors.clone());
            let failures = failures.clone();
            never_error_with(responses, move |err| {
                tracing::error!(page, error = %err, "activity page failed");
                // A closed channel means the screen is gone.
                let _ = failures.send(err);
            })
            .map(move |envelope| (page, envelope))
        })
        .scan(Vec::new(), move |activities: &mut Vec<Activity>, (page, envelope)| {
            if page == 1 {
                activities.clear();
            }
            activities.extend(envelope.activities);
            future::ready(Some(FeedState {
                activities: activities.clone(),
                logged_in,
                loaded: true,
            }))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::NetworkError;
    use crate::models::User;
    use crate::scheduler::UiLoop;
    use crate::session::Session;
    use std::time::Duration;

    const BASE: &str = "https://api.example.com";

    fn page_json(ids: &[u64]) -> String {
        let activities: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id": {}, "category": "launch", "created_at": "2016-01-12T10:00:00Z"}}"#,
                    id
                )
            })
            .collect();
        format!(r#"{{"activities": [{}]}}"#, activities.join(","))
    }

    async fn next_matching<S, T>(stream: &mut S, mut pred: impl FnMut(&T) -> bool) -> T
    where
        S: Stream<Item = T> + Unpin,
    {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let value = stream.next().await.expect("stream ended");
                if pred(&value) {
                    return value;
                }
            }
        })
        .await
        .expect("timed out")
    }

    fn page_url(page: u32) -> String {
        format!("{}/v1/activities?page={}", BASE, page)
    }

    #[tokio::test]
    async fn test_logged_out_empty_feed() {
        let http = MockHttpClient::new();
        http.set_json(&page_url(1), 200, &page_json(&[]));
        let (_ui_loop, scheduler) = UiLoop::new();
        let api = ApiClient::new(http, BASE, "test", Session::new());

        let view_model = ActivityFeedViewModel::new(api, scheduler);

        let mut logged_out = view_model.logged_out_empty_state();
        assert!(next_matching(&mut logged_out, |shown| *shown).await);

        let mut logged_in = view_model.logged_in_empty_state();
        assert!(!logged_in.next().await.unwrap());
    }

    #[tokio::test]
    async fn test_next_page_appends() {
        let http = MockHttpClient::new();
        http.set_json(&page_url(1), 200, &page_json(&[1, 2]));
        http.set_json(&page_url(2), 200, &page_json(&[3]));
        let (_ui_loop, scheduler) = UiLoop::new();
        let session = Session::new();
        session.login(
            User {
                id: 1,
                name: "Nadia".to_string(),
                avatar: None,
            },
            "token",
        );
        let api = ApiClient::new(http.clone(), BASE, "test", session);

        let view_model = ActivityFeedViewModel::new(api, scheduler);
        let mut activities = view_model.activities();

        let first = next_matching(&mut activities, |list: &Vec<Activity>| !list.is_empty()).await;
        assert_eq!(first.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);

        view_model.next_page();
        let both = next_matching(&mut activities, |list: &Vec<Activity>| list.len() == 3).await;
        assert_eq!(both.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let urls: Vec<String> = http.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec![page_url(1), page_url(2)]);
    }

    #[tokio::test]
    async fn test_refresh_restarts_at_first_page() {
        let http = MockHttpClient::new();
        http.set_json(&page_url(1), 200, &page_json(&[1]));
        http.set_json(&page_url(2), 200, &page_json(&[2]));
        let (_ui_loop, scheduler) = UiLoop::new();
        let api = ApiClient::new(http.clone(), BASE, "test", Session::new());

        let mut view_model = ActivityFeedViewModel::new(api, scheduler);
        let mut activities = view_model.activities();
        next_matching(&mut activities, |list: &Vec<Activity>| list.len() == 1).await;

        view_model.next_page();
        next_matching(&mut activities, |list: &Vec<Activity>| list.len() == 2).await;

        view_model.refresh();
        let reloaded = next_matching(&mut activities, |list: &Vec<Activity>| list.len() == 1).await;
        assert_eq!(reloaded[0].id, 1);

        let urls: Vec<String> = http.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec![page_url(1), page_url(2), page_url(1)]);
    }

    #[tokio::test]
    async fn test_api_error_reaches_errors_output() {
        let http = MockHttpClient::new();
        http.set_json(
            &page_url(1),
            503,
            r#"{"error_messages": ["Down for maintenance"], "http_code": 503}"#,
        );
        let (_ui_loop, scheduler) = UiLoop::new();
        let api = ApiClient::new(http, BASE, "test", Session::new());

        let mut view_model = ActivityFeedViewModel::new(api, scheduler);
        let mut errors = view_model.errors().unwrap();
        assert!(view_model.errors().is_none());

        let envelope = next_matching(&mut errors, |_| true).await;
        assert_eq!(envelope.http_code, 503);
        assert_eq!(envelope.error_message(), Some("Down for maintenance"));
    }

    #[tokio::test]
    async fn test_network_failure_reaches_failures_output() {
        let http = MockHttpClient::new();
        http.set_response(
            &page_url(1),
            MockResponse::Fail(NetworkError::ConnectionFailed {
                url: page_url(1),
                message: "connection refused".to_string(),
            }),
        );
        let (_ui_loop, scheduler) = UiLoop::new();
        let api = ApiClient::new(http, BASE, "test", Session::new());

        let mut view_model = ActivityFeedViewModel::new(api, scheduler);
        let mut errors = view_model.errors().unwrap();
        let mut failures = view_model.failures().unwrap();
        assert!(view_model.failures().is_none());

        let failure = next_matching(&mut failures, |_| true).await;
        assert!(matches!(failure, ClientError::Network(NetworkError::ConnectionFailed { .. })));
        assert!(futures::FutureExt::now_or_never(errors.next()).is_none());
    }
}
