//! Mock transport setup for integration tests.
//!
//! Re-exports the mocks from `backer::adapters::mock` and adds a builder for
//! the common response setups.

pub use backer::adapters::mock::{MockHttpClient, MockResponse};
pub use backer::traits::{Headers, HttpClient, Response};

use backer::error::NetworkError;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Answer `url` with a JSON body.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_json(url, status, json);
        self
    }

    /// Answer `url` with a structured API error.
    pub fn with_api_error(self, url: &str, status: u16, message: &str, ksr_code: Option<&str>) -> Self {
        let body = serde_json::json!({
            "error_messages": [message],
            "http_code": status,
            "ksr_code": ksr_code,
        });
        self.client.set_json(url, status, &body.to_string());
        self
    }

    /// Fail `url` without a response.
    #[allow(dead_code)]
    pub fn with_network_error(self, url: &str, error: NetworkError) -> Self {
        self.client.set_response(url, MockResponse::Fail(error));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
