//! View-models: intents in, UI-ready output streams out.

pub mod activity_feed;

pub use activity_feed::ActivityFeedViewModel;

use futures::stream::{self, Stream};
use tokio::sync::{mpsc, watch};

/// Every value sent into `rx`, ending once all senders are dropped.
pub(crate) fn receiver_stream<T: Send + 'static>(rx: mpsc::UnboundedReceiver<T>) -> impl Stream<Item = T> {
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|value| (value, rx)) })
}

/// The current value of `rx`, then every later change.
pub(crate) fn watch_stream<T>(rx: watch::Receiver<T>) -> impl Stream<Item = T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first {
            rx.changed().await.ok()?;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
}
