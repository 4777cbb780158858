//! Structured error bodies returned by the backend.

use serde::{Deserialize, Serialize};

const INVALID_XAUTH_LOGIN: &str = "invalid_xauth_login";
const TFA_REQUIRED: &str = "tfa_required";
const TFA_FAILED: &str = "tfa_failed";
const CONFIRM_FACEBOOK_SIGNUP: &str = "confirm_facebook_signup";
const MISSING_FACEBOOK_EMAIL: &str = "missing_facebook_email";
const FACEBOOK_INVALID_ACCESS_TOKEN: &str = "facebook_invalid_access_token";

/// A decoded, well-formed error response from the backend.
///
/// Wire shape:
///
/// ```json
/// { "error_messages": ["Email is invalid"], "http_code": 422, "ksr_code": "tfa_failed" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub http_code: u16,
    #[serde(default)]
    pub ksr_code: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(http_code: u16, error_messages: Vec<String>, ksr_code: Option<String>) -> Self {
        Self {
            error_messages,
            http_code,
            ksr_code,
        }
    }

    /// Decode a non-2xx response body.
    ///
    /// Bodies that are not an envelope still produce one, carrying the
    /// status code and the body text (if any) as its only message, so that
    /// every answered request is treated as a structured API error.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        if let Ok(mut envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
            if envelope.http_code == 0 {
                envelope.http_code = status;
            }
            return envelope;
        }

        let text = String::from_utf8_lossy(body).trim().to_string();
        let messages = if text.is_empty() { Vec::new() } else { vec![text] };
        Self::new(status, messages, None)
    }

    /// The first error message, if the server sent any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_messages.first().map(String::as_str)
    }

    pub fn is_invalid_login_error(&self) -> bool {
        self.has_code(INVALID_XAUTH_LOGIN)
    }

    pub fn is_tfa_required_error(&self) -> bool {
        self.has_code(TFA_REQUIRED)
    }

    pub fn is_tfa_failed_error(&self) -> bool {
        self.has_code(TFA_FAILED)
    }

    pub fn is_confirm_facebook_signup_error(&self) -> bool {
        self.has_code(CONFIRM_FACEBOOK_SIGNUP)
    }

    pub fn is_missing_facebook_email_error(&self) -> bool {
        self.has_code(MISSING_FACEBOOK_EMAIL)
    }

    pub fn is_facebook_invalid_access_token_error(&self) -> bool {
        self.has_code(FACEBOOK_INVALID_ACCESS_TOKEN)
    }

    fn has_code(&self, code: &str) -> bool {
        self.ksr_code.as_deref() == Some(code)
    }
}
