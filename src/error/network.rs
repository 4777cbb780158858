//! Transport-level error types.
//!
//! These never carry a decoded backend response: anything the server
//! answered with a status code is turned into an [`ErrorEnvelope`] instead.
//!
//! [`ErrorEnvelope`]: super::ErrorEnvelope

use std::fmt;

/// Failures below the HTTP response layer.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// DNS resolution failed.
    DnsResolutionFailed { host: String },

    /// Request timed out.
    Timeout { operation: String, duration_secs: u64 },

    /// TLS/SSL error.
    TlsError { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic transport error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::DnsResolutionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::TlsError { .. } => false, // Usually config issue
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection.".to_string()
            }
            NetworkError::DnsResolutionFailed { host } => {
                format!("Could not resolve server address '{}'.", host)
            }
            NetworkError::Timeout { operation, duration_secs } => {
                format!(
                    "The {} operation timed out after {} seconds.",
                    operation, duration_secs
                )
            }
            NetworkError::TlsError { .. } => {
                "A secure connection could not be established.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::DnsResolutionFailed { .. } => "E_NET_DNS",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::TlsError { .. } => "E_NET_TLS",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::DnsResolutionFailed { host } => {
                write!(f, "DNS resolution failed for '{}'", host)
            }
            NetworkError::Timeout { operation, duration_secs } => {
                write!(f, "{} timed out after {} seconds", operation, duration_secs)
            }
            NetworkError::TlsError { message } => write!(f, "TLS error: {}", message),
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a reqwest error into a NetworkError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str, timeout_secs: u64) -> NetworkError {
    if err.is_timeout() {
        return NetworkError::Timeout {
            operation: "HTTP request".to_string(),
            duration_secs: timeout_secs,
        };
    }
    if err.is_connect() {
        return NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        };
    }

    let err_str = err.to_string().to_lowercase();
    if err_str.contains("tls") || err_str.contains("ssl") || err_str.contains("certificate") {
        NetworkError::TlsError {
            message: err.to_string(),
        }
    } else if err_str.contains("dns") || err_str.contains("resolve") {
        NetworkError::DnsResolutionFailed {
            host: extract_host_from_url(url),
        }
    } else {
        NetworkError::Other {
            message: err.to_string(),
        }
    }
}

/// Extract the host portion from a URL string.
fn extract_host_from_url(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    without_scheme
        .split(&['/', ':'][..])
        .next()
        .unwrap_or(url)
        .to_string()
}
