//! The UI execution context.
//!
//! Rendering and adapter mutation happen on one thread, the one that owns
//! the [`UiLoop`]. Any other thread reaches it by scheduling a task through
//! a [`UiScheduler`] handle; the task runs the next time the loop drains.

use std::marker::PhantomData;
use std::thread::{self, ThreadId};

use tokio::sync::mpsc;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Task queue of the UI thread.
///
/// Bound to the thread that created it and cannot be moved to another one.
pub struct UiLoop {
    tasks: mpsc::UnboundedReceiver<Task>,
    thread: ThreadId,
    _not_send: PhantomData<*const ()>,
}

/// Cloneable handle for scheduling work onto a [`UiLoop`].
#[derive(Clone)]
pub struct UiScheduler {
    tasks: mpsc::UnboundedSender<Task>,
    thread: ThreadId,
}

impl UiLoop {
    /// Create a loop owned by the calling thread.
    pub fn new() -> (Self, UiScheduler) {
        let (tx, rx) = mpsc::unbounded_channel();
        let thread = thread::current().id();

        let ui_loop = Self {
            tasks: rx,
            thread,
            _not_send: PhantomData,
        };
        let scheduler = UiScheduler { tasks: tx, thread };
        (ui_loop, scheduler)
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread
    }

    /// Run every task queued so far. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.tasks.try_recv() {
            task();
            ran += 1;
        }
        if ran > 0 {
            tracing::trace!(ran, "ui loop drained");
        }
        ran
    }

    /// Run tasks as they arrive until every scheduler handle is dropped.
    pub async fn run(mut self) {
        while let Some(task) = self.tasks.recv().await {
            task();
        }
        tracing::debug!("ui loop finished");
    }
}

impl UiScheduler {
    /// True when called from the thread that owns the loop.
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread
    }

    /// Queue `task` onto the loop. Returns false if the loop is gone, in
    /// which case the task is dropped without running.
    pub fn schedule<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.tasks.send(Box::new(task)).is_ok()
    }
}

impl std::fmt::Debug for UiScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiScheduler")
            .field("thread", &self.thread)
            .field("closed", &self.tasks.is_closed())
            .finish()
    }
}
