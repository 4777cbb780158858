//! Keeping a pipeline alive across failed requests.
//!
//! A screen's pipeline typically maps a user intent to an API call. If the
//! call's error reached the outer stream it would end the pipeline, and the
//! screen would stop reacting until recreated. These transformers end only
//! the inner request stream and, optionally, hand the error to a side
//! channel the screen renders from.
//!
//! [`never_error`] swallows everything. [`never_api_error`] swallows only
//! errors carrying an [`ErrorEnvelope`]; transport failures and bugs still
//! terminate the stream.

use futures::future;
use futures::stream;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{ApiErrorSource, ErrorEnvelope};

/// End quietly at the first error instead of propagating it.
pub fn never_error<S, T, E>(source: S) -> impl Stream<Item = T>
where
    S: Stream<Item = Result<T, E>>,
{
    never_error_with(source, |_| {})
}

/// Like [`never_error`], calling `on_error` with the error before ending.
pub fn never_error_with<S, T, E, F>(source: S, on_error: F) -> impl Stream<Item = T>
where
    S: Stream<Item = Result<T, E>>,
    F: FnOnce(E),
{
    source.scan(Some(on_error), |on_error, item| {
        let out = match item {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!("stream error suppressed");
                if let Some(on_error) = on_error.take() {
                    on_error(err);
                }
                None
            }
        };
        future::ready(out)
    })
}

/// [`never_error`] that forwards the error to `errors`.
pub fn pipe_errors_to<S, T, E>(source: S, errors: UnboundedSender<E>) -> impl Stream<Item = T>
where
    S: Stream<Item = Result<T, E>>,
{
    never_error_with(source, move |err| {
        // A closed side channel means the screen is gone; nothing left to tell.
        let _ = errors.send(err);
    })
}

/// End quietly at the first API error; let any other error through as the
/// terminal item.
pub fn never_api_error<S, T, E>(source: S) -> impl Stream<Item = Result<T, E>>
where
    S: Stream<Item = Result<T, E>>,
    E: ApiErrorSource,
{
    never_api_error_with(source, |_| {})
}

/// Like [`never_api_error`], calling `on_error` with the decoded envelope.
pub fn never_api_error_with<S, T, E, F>(source: S, on_error: F) -> impl Stream<Item = Result<T, E>>
where
    S: Stream<Item = Result<T, E>>,
    E: ApiErrorSource,
    F: FnOnce(ErrorEnvelope),
{
    stream::unfold(Some((Box::pin(source), on_error)), |state| async move {
        let (mut source, on_error) = state?;
        match source.next().await? {
            Ok(value) => Some((Ok(value), Some((source, on_error)))),
            Err(err) => match err.error_envelope().cloned() {
                Some(envelope) => {
                    tracing::warn!(
                        http_code = envelope.http_code,
                        ksr_code = envelope.ksr_code.as_deref().unwrap_or(""),
                        "API error suppressed"
                    );
                    on_error(envelope);
                    None
                }
                None => Some((Err(err), None)),
            },
        }
    })
}

/// [`never_api_error`] that forwards the envelope to `errors`.
pub fn pipe_api_errors_to<S, T, E>(
    source: S,
    errors: UnboundedSender<ErrorEnvelope>,
) -> impl Stream<Item = Result<T, E>>
where
    S: Stream<Item = Result<T, E>>,
    E: ApiErrorSource,
{
    never_api_error_with(source, move |envelope| {
        let _ = errors.send(envelope);
    })
}
