//! The error type carried by API response streams.

use thiserror::Error;

use super::{ErrorCategory, ErrorEnvelope, NetworkError};

/// Result alias for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything an API response stream can terminate with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The server answered with a structured error body.
    #[error("API error ({}): {}", .0.http_code, .0.error_message().unwrap_or("no message"))]
    Api(ErrorEnvelope),

    /// The request never produced a response.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// A 2xx body did not match the expected model.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Api(_) => ErrorCategory::Api,
            ClientError::Network(_) => ErrorCategory::Network,
            ClientError::Decode { .. } => ErrorCategory::Decode,
            ClientError::Other { .. } => ErrorCategory::Client,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(envelope) => envelope
                .error_message()
                .map(str::to_string)
                .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
            ClientError::Network(err) => err.user_message(),
            ClientError::Decode { .. } | ClientError::Other { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

impl From<ErrorEnvelope> for ClientError {
    fn from(envelope: ErrorEnvelope) -> Self {
        ClientError::Api(envelope)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode {
            message: err.to_string(),
        }
    }
}

/// Recognizes errors that carry a decoded [`ErrorEnvelope`].
///
/// This is the test the "never API error" transformers make before deciding
/// whether to swallow an error or let it terminate the stream.
pub trait ApiErrorSource {
    fn error_envelope(&self) -> Option<&ErrorEnvelope>;
}

impl ApiErrorSource for ClientError {
    fn error_envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ClientError::Api(envelope) => Some(envelope),
            _ => None,
        }
    }
}

impl ApiErrorSource for ErrorEnvelope {
    fn error_envelope(&self) -> Option<&ErrorEnvelope> {
        Some(self)
    }
}
