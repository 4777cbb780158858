//! Error types for the client core.
//!
//! | Type | Meaning | Recovered by the stream layer |
//! |------|---------|-------------------------------|
//! | [`ClientError::Api`] | decoded backend error envelope | Yes (`never_api_error`) |
//! | [`ClientError::Network`] | transport failure | No |
//! | [`ClientError::Decode`] | unexpected response body | No |
//! | [`ListIndexError`] | renderer and model out of sync | No (programming error) |
//!
//! Only errors that answer `Some` from [`ApiErrorSource::error_envelope`]
//! are treated as display-only; everything else ends the stream.

mod category;
mod client;
mod envelope;
mod list;
mod network;

pub use category::ErrorCategory;
pub use client::{ApiErrorSource, ClientError, ClientResult};
pub use envelope::ErrorEnvelope;
pub use list::ListIndexError;
pub use network::{classify_reqwest_error, NetworkError};
