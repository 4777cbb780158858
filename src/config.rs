//! Client configuration.

/// Default backend URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.kickstarter.com";
/// Default client identifier sent with every request.
pub const DEFAULT_CLIENT_ID: &str = "backer-cli";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for the API client and logging.
///
/// # Example
///
/// ```ignore
/// use backer::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("http://localhost:3000")
///     .with_request_timeout_secs(5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_base_url: String,
    /// Sent as `X-Client-Id`
    pub client_id: String,
    /// Per-request timeout (default: 30)
    pub request_timeout_secs: u64,
    /// `tracing_subscriber` filter directive (default: "info")
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Defaults overlaid with `BACKER_API_URL`, `BACKER_CLIENT_ID`,
    /// `BACKER_TIMEOUT_SECS` and `RUST_LOG`.
    ///
    /// Empty variables are ignored, as is a timeout that is not a positive
    /// integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_var("BACKER_API_URL") {
            config = config.with_api_base_url(url);
        }
        if let Some(client_id) = non_empty_var("BACKER_CLIENT_ID") {
            config = config.with_client_id(client_id);
        }
        if let Some(raw) = non_empty_var("BACKER_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_request_timeout_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring invalid BACKER_TIMEOUT_SECS"),
            }
        }
        if let Some(filter) = non_empty_var("RUST_LOG") {
            config = config.with_log_filter(filter);
        }

        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
