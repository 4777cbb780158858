//! Per-screen ownership of running pipelines.

use std::future::Future;

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;

/// The set of tasks a screen keeps alive.
///
/// Dropping the bag aborts every task in it, which is how a screen tears
/// down its pipelines when it goes away.
#[derive(Debug, Default)]
pub struct Subscriptions {
    handles: Vec<JoinHandle<()>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an already spawned task.
    pub fn add(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Spawn `future` and keep it alive as long as the bag.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.add(tokio::spawn(future));
    }

    /// Spawn a task that feeds every item of `stream` to `on_next`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe<S, F>(&mut self, stream: S, mut on_next: F)
    where
        S: Stream + Send + 'static,
        S::Item: Send,
        F: FnMut(S::Item) + Send + 'static,
    {
        self.spawn(async move {
            let mut stream = std::pin::pin!(stream);
            while let Some(item) = stream.next().await {
                on_next(item);
            }
        });
    }

    /// Number of tasks that have not finished yet.
    pub fn len(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Abort every task.
    pub fn clear(&mut self) {
        if !self.handles.is_empty() {
            tracing::debug!(count = self.handles.len(), "releasing subscriptions");
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.clear();
    }
}
