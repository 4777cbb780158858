//! Materialized streams: completion and failure as ordinary values.

use futures::future;
use futures::stream;
use futures::{Stream, StreamExt};

/// One reified signal of a fallible stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<T, E> {
    Next(T),
    Completed,
    Error(E),
}

impl<T, E> Notification<T, E> {
    pub fn is_next(&self) -> bool {
        matches!(self, Notification::Next(_))
    }

    /// True for `Completed` and `Error`.
    pub fn is_terminal(&self) -> bool {
        !self.is_next()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Notification::Next(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Notification::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Reify a fallible stream.
///
/// Every `Ok` becomes `Next`; the stream then ends with exactly one terminal
/// notification: `Error` for the first `Err` (nothing after it is read), or
/// `Completed` if the source ran out.
pub fn materialize<S, T, E>(source: S) -> impl Stream<Item = Notification<T, E>>
where
    S: Stream<Item = Result<T, E>>,
{
    // `None` once the terminal notification is out; the source is not polled again.
    stream::unfold(Some(Box::pin(source)), |source| async move {
        let mut source = source?;
        let terminal = match source.next().await {
            Some(Ok(value)) => return Some((Notification::Next(value), Some(source))),
            Some(Err(err)) => Notification::Error(err),
            None => Notification::Completed,
        };
        Some((terminal, None))
    })
}

/// The successful payloads of a materialized stream.
pub fn values<S, T, E>(source: S) -> impl Stream<Item = T>
where
    S: Stream<Item = Notification<T, E>>,
{
    source.filter_map(|notification| {
        future::ready(match notification {
            Notification::Next(value) => Some(value),
            _ => None,
        })
    })
}

/// Emits the error of a materialized stream that terminated with one.
pub fn errors<S, T, E>(source: S) -> impl Stream<Item = E>
where
    S: Stream<Item = Notification<T, E>>,
{
    source.filter_map(|notification| {
        future::ready(match notification {
            Notification::Error(err) => Some(err),
            _ => None,
        })
    })
}

/// Emits once if a materialized stream completed normally.
pub fn completed<S, T, E>(source: S) -> impl Stream<Item = ()>
where
    S: Stream<Item = Notification<T, E>>,
{
    source.filter_map(|notification| {
        future::ready(match notification {
            Notification::Completed => Some(()),
            _ => None,
        })
    })
}
