//! Single-input transformers that reshape each emission.

use futures::future;
use futures::{Stream, StreamExt};

/// Replace every `None` with `default`.
pub fn coalesce<S, T>(source: S, default: T) -> impl Stream<Item = T>
where
    S: Stream<Item = Option<T>>,
    T: Clone,
{
    source.map(move |value| value.unwrap_or_else(|| default.clone()))
}

/// Drop the payload of every emission, keeping only the fact that it happened.
pub fn ignore_values<S>(source: S) -> impl Stream<Item = ()>
where
    S: Stream,
{
    source.map(|_| ())
}

/// Count emissions, starting at `first_page`.
///
/// Feeding a "next page" intent stream through this yields the page number
/// to request.
pub fn incremental_count<S>(source: S, first_page: u32) -> impl Stream<Item = u32>
where
    S: Stream,
{
    source.scan(first_page, |next, _| {
        let page = *next;
        *next = next.saturating_add(1);
        future::ready(Some(page))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_coalesce_replaces_none() {
        let out: Vec<i32> = coalesce(stream::iter(vec![Some(1), None, Some(2)]), 0)
            .collect()
            .await;
        assert_eq!(out, vec![1, 0, 2]);
    }

    #[tokio::test]
    async fn test_ignore_values() {
        let out: Vec<()> = ignore_values(stream::iter(vec!["a", "b"])).collect().await;
        assert_eq!(out, vec![(), ()]);
    }

    #[tokio::test]
    async fn test_incremental_count_defaults_to_page_one() {
        let out: Vec<u32> = incremental_count(stream::iter(vec![(); 3]), 1).collect().await;
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_incremental_count_custom_start() {
        let out: Vec<u32> = incremental_count(stream::iter(vec!["x", "y"]), 5).collect().await;
        assert_eq!(out, vec![5, 6]);
    }
}
