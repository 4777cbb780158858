//! Two-input transformers.
//!
//! When both inputs have something ready at the same poll, the data input is
//! drained before the trigger input. That makes "latest value at the time
//! the signal fired" deterministic: every value produced before the signal
//! has been seen by the time the signal is handled.

use futures::future;
use futures::stream::{self, PollNext};
use futures::{Stream, StreamExt};

enum Event<A, B> {
    Value(A),
    Trigger(B),
    TriggerDone,
}

fn prefer_values(_: &mut ()) -> PollNext {
    PollNext::Left
}

/// Interleave `values` and `triggers`, ending the merged stream with a
/// `TriggerDone` marker once `triggers` ends.
fn merge_with_trigger<A, B>(
    values: A,
    triggers: B,
) -> impl Stream<Item = Event<A::Item, B::Item>>
where
    A: Stream,
    B: Stream,
{
    let values = values.map(Event::Value);
    let triggers = triggers
        .map(Event::Trigger)
        .chain(stream::once(future::ready(Event::TriggerDone)));

    stream::select_with_strategy(values, triggers, prefer_values)
}

/// Pair the latest value of each input whenever either of them emits.
///
/// Nothing is emitted until both inputs have produced a value. Ends once
/// both inputs have ended, or as soon as `second` ends without a value.
pub fn combine_latest_pair<S, T>(source: S, second: T) -> impl Stream<Item = (S::Item, T::Item)>
where
    S: Stream,
    T: Stream,
    S::Item: Clone,
    T::Item: Clone,
{
    let latest: (Option<S::Item>, Option<T::Item>) = (None, None);

    merge_with_trigger(source, second)
        .scan(latest, |(latest_source, latest_second), event| {
            match event {
                Event::Value(value) => *latest_source = Some(value),
                Event::Trigger(value) => *latest_second = Some(value),
                Event::TriggerDone if latest_second.is_none() => return future::ready(None),
                Event::TriggerDone => return future::ready(Some(None)),
            }
            let pair = match (&*latest_source, &*latest_second) {
                (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                _ => None,
            };
            future::ready(Some(pair))
        })
        .filter_map(future::ready)
}

/// Pair the n-th emission of `source` with the n-th emission of `second`.
///
/// Ends as soon as either input ends; unmatched values are dropped.
pub fn zip_pair<S, T>(source: S, second: T) -> impl Stream<Item = (S::Item, T::Item)>
where
    S: Stream,
    T: Stream,
{
    source.zip(second)
}

/// Emit the latest value of `source` each time `signal` emits.
///
/// Values of `source` never trigger an emission by themselves, and a signal
/// that fires before `source` has produced anything is dropped. A signal
/// that fires twice without a new value repeats the last one. Ends when
/// `signal` ends.
pub fn take_when<S, G>(source: S, signal: G) -> impl Stream<Item = S::Item>
where
    S: Stream,
    G: Stream,
    S::Item: Clone,
{
    take_pair_when(source, signal).map(|(value, _)| value)
}

/// Like [`take_when`], but also carries the value the signal emitted.
pub fn take_pair_when<S, G>(source: S, signal: G) -> impl Stream<Item = (S::Item, G::Item)>
where
    S: Stream,
    G: Stream,
    S::Item: Clone,
{
    let mut latest = None;

    merge_with_trigger(source, signal)
        .take_while(|event| future::ready(!matches!(event, Event::TriggerDone)))
        .filter_map(move |event| {
            let out = match event {
                Event::Value(value) => {
                    latest = Some(value);
                    None
                }
                Event::Trigger(fired) => latest.clone().map(|value| (value, fired)),
                Event::TriggerDone => None,
            };
            future::ready(out)
        })
}

/// Drop everything `source` emits until `until` emits once, then forward
/// `source` unchanged.
///
/// Only the first emission of `until` matters. If `until` ends without
/// emitting, the result ends too.
pub fn wait_until<S, U>(source: S, until: U) -> impl Stream<Item = S::Item>
where
    S: Stream,
    U: Stream,
{
    merge_with_trigger(source, until.take(1))
        .scan(false, |open, event| {
            let step = match event {
                Event::Value(value) => Some(if *open { Some(value) } else { None }),
                Event::Trigger(_) => {
                    *open = true;
                    Some(None)
                }
                Event::TriggerDone if *open => Some(None),
                Event::TriggerDone => None,
            };
            future::ready(step)
        })
        .filter_map(future::ready)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::FutureExt;

    #[tokio::test]
    async fn test_combine_latest_waits_for_both_sides() {
        let (a_tx, a_rx) = mpsc::unbounded();
        let (b_tx, b_rx) = mpsc::unbounded();
        let mut out = Box::pin(combine_latest_pair(a_rx, b_rx));

        a_tx.unbounded_send(1).unwrap();
        assert!(out.next().now_or_never().is_none());

        b_tx.unbounded_send("x").unwrap();
        assert_eq!(out.next().now_or_never(), Some(Some((1, "x"))));

        a_tx.unbounded_send(2).unwrap();
        assert_eq!(out.next().now_or_never(), Some(Some((2, "x"))));

        b_tx.unbounded_send("y").unwrap();
        assert_eq!(out.next().now_or_never(), Some(Some((2, "y"))));
    }

    #[tokio::test]
    async fn test_combine_latest_ends_when_both_end() {
        let (a_tx, a_rx) = mpsc::unbounded();
        let (b_tx, b_rx) = mpsc::unbounded();
        let mut out = Box::pin(combine_latest_pair(a_rx, b_rx));

        a_tx.unbounded_send(1).unwrap();
        b_tx.unbounded_send(10).unwrap();
        assert_eq!(out.next().await, Some((1, 10)));

        drop(a_tx);
        b_tx.unbounded_send(11).unwrap();
        assert_eq!(out.next().await, Some((1, 11)));

        drop(b_tx);
        assert_eq!(out.next().await, None);
    }

    #[tokio::test]
    async fn test_combine_latest_ends_when_second_ends_empty() {
        let (a_tx, a_rx) = mpsc::unbounded::<i32>();
        let (b_tx, b_rx) = mpsc::unbounded::<&str>();
        let mut out = Box::pin(combine_latest_pair(a_rx, b_rx));

        a_tx.unbounded_send(1).unwrap();
        drop(b_tx);

        // `a_tx` is still open, but no pair can ever be formed.
        assert_eq!(out.next().now_or_never(), Some(None));
    }

    #[tokio::test]
    async fn test_zip_pair_drops_unmatched_tail() {
        let out: Vec<_> = zip_pair(
            stream::iter(vec!['a', 'b', 'c']),
            stream::iter(vec!['x', 'y']),
        )
        .collect()
        .await;
        assert_eq!(out, vec![('a', 'x'), ('b', 'y')]);
    }

    #[tokio::test]
    async fn test_take_when_emits_latest_value() {
        let (src_tx, src_rx) = mpsc::unbounded();
        let (sig_tx, sig_rx) = mpsc::unbounded();

        src_tx.unbounded_send(1).unwrap();
        src_tx.unbounded_send(2).unwrap();
        sig_tx.unbounded_send(()).unwrap();
        sig_tx.unbounded_send(()).unwrap();
        drop(sig_tx);

        let out: Vec<i32> = take_when(src_rx, sig_rx).collect().await;
        assert_eq!(out, vec![2, 2]);
    }

    #[tokio::test]
    async fn test_take_when_ignores_signal_before_first_value() {
        let (src_tx, src_rx) = mpsc::unbounded();
        let (sig_tx, sig_rx) = mpsc::unbounded();
        let mut out = Box::pin(take_when(src_rx, sig_rx));

        sig_tx.unbounded_send(()).unwrap();
        assert!(out.next().now_or_never().is_none());

        src_tx.unbounded_send("form").unwrap();
        assert!(out.next().now_or_never().is_none());

        sig_tx.unbounded_send(()).unwrap();
        assert_eq!(out.next().now_or_never(), Some(Some("form")));
    }

    #[tokio::test]
    async fn test_take_when_ends_with_signal() {
        let (src_tx, src_rx) = mpsc::unbounded::<i32>();
        let (sig_tx, sig_rx) = mpsc::unbounded::<()>();
        let mut out = Box::pin(take_when(src_rx, sig_rx));

        drop(sig_tx);
        assert_eq!(out.next().await, None);
        drop(src_tx);
    }

    #[tokio::test]
    async fn test_take_pair_when_carries_signal_value() {
        let (src_tx, src_rx) = mpsc::unbounded();
        let (sig_tx, sig_rx) = mpsc::unbounded();

        src_tx.unbounded_send("email@example.com").unwrap();
        sig_tx.unbounded_send(1).unwrap();
        sig_tx.unbounded_send(2).unwrap();
        drop(sig_tx);

        let out: Vec<_> = take_pair_when(src_rx, sig_rx).collect().await;
        assert_eq!(out, vec![("email@example.com", 1), ("email@example.com", 2)]);
    }

    #[tokio::test]
    async fn test_wait_until_drops_values_before_gate() {
        let (src_tx, src_rx) = mpsc::unbounded();
        let (gate_tx, gate_rx) = mpsc::unbounded();
        let mut out = Box::pin(wait_until(src_rx, gate_rx));

        src_tx.unbounded_send(1).unwrap();
        assert!(out.next().now_or_never().is_none());

        gate_tx.unbounded_send(()).unwrap();
        gate_tx.unbounded_send(()).unwrap();
        assert!(out.next().now_or_never().is_none());

        src_tx.unbounded_send(2).unwrap();
        src_tx.unbounded_send(3).unwrap();
        drop(src_tx);

        let rest: Vec<i32> = out.collect().await;
        assert_eq!(rest, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_wait_until_ends_if_gate_never_opens() {
        let (src_tx, src_rx) = mpsc::unbounded::<i32>();
        let (gate_tx, gate_rx) = mpsc::unbounded::<()>();
        let mut out = Box::pin(wait_until(src_rx, gate_rx));

        drop(gate_tx);
        assert_eq!(out.next().await, None);
        drop(src_tx);
    }
}
