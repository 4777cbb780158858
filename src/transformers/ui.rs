//! Delivering emissions on the UI context.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::scheduler::UiScheduler;

/// Stream returned by [`observe_for_ui`].
#[must_use = "streams do nothing unless polled"]
pub struct ObserveForUi<S: Stream> {
    source: Pin<Box<S>>,
    source_done: bool,
    scheduler: UiScheduler,
    marshal_tx: Option<mpsc::UnboundedSender<S::Item>>,
    marshal_rx: mpsc::UnboundedReceiver<S::Item>,
    in_flight: usize,
}

/// Make every emission of `source` observable on the UI context.
///
/// An emission pulled on the UI thread, with nothing already waiting in the
/// UI queue, is forwarded synchronously; no extra loop turn is spent.
/// Anything else is queued onto the [`UiLoop`](crate::scheduler::UiLoop)
/// and only comes out of this stream after the loop has run it. Order of
/// emissions is preserved either way.
pub fn observe_for_ui<S>(source: S, scheduler: UiScheduler) -> ObserveForUi<S>
where
    S: Stream,
    S::Item: Send + 'static,
{
    let (marshal_tx, marshal_rx) = mpsc::unbounded_channel();
    ObserveForUi {
        source: Box::pin(source),
        source_done: false,
        scheduler,
        marshal_tx: Some(marshal_tx),
        marshal_rx,
        in_flight: 0,
    }
}

impl<S> Stream for ObserveForUi<S>
where
    S: Stream,
    S::Item: Send + 'static,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match this.marshal_rx.poll_recv(cx) {
                Poll::Ready(Some(item)) => {
                    this.in_flight -= 1;
                    return Poll::Ready(Some(item));
                }
                // Source finished and every queued emission has been handed out.
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => {}
            }

            if this.source_done {
                return Poll::Pending;
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if this.in_flight == 0 && this.scheduler.is_current() {
                        return Poll::Ready(Some(item));
                    }

                    let Some(tx) = this.marshal_tx.clone() else {
                        continue;
                    };
                    let queued = this.scheduler.schedule(move || {
                        let _ = tx.send(item);
                    });
                    if queued {
                        this.in_flight += 1;
                    } else {
                        tracing::warn!("ui loop gone, dropping emission");
                    }
                }
                Poll::Ready(None) => {
                    this.source_done = true;
                    this.marshal_tx = None;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
