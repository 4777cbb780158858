//! Error category classification.
//!
//! Categories drive the one policy decision the stream layer makes about an
//! error: whether it is a recognized backend failure that a screen can show
//! and move past, or a hard failure that ends the pipeline.

use std::fmt;

/// High-level categorization of client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The backend answered with a decoded error envelope.
    /// Recoverable: the screen displays it or absorbs it.
    Api,

    /// Transport failures (connection, DNS, timeout, TLS).
    Network,

    /// The response could not be decoded into the expected model.
    Decode,

    /// Programming errors, such as a list position the model does not have.
    Client,
}

impl ErrorCategory {
    /// Returns true if errors in this category may be absorbed without
    /// terminating the stream that produced them.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorCategory::Api)
    }

    /// Returns true if the operation is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Api => "api",
            ErrorCategory::Network => "network",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Client => "client",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Api => "The server rejected the request",
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Decode => "Unexpected response from the server",
            ErrorCategory::Client => "Application error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
