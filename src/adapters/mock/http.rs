//! Mock HTTP client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::NetworkError;
use crate::traits::{Headers, HttpClient, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Answer with this response (any status)
    Respond(Response),
    /// Fail without a response
    Fail(NetworkError),
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by exact URL, then by URL prefix, then the
/// default response.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://api.example.com/v1/activities",
///     MockResponse::Respond(Response::new(200, r#"{"activities":[]}"#)),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Shorthand for a JSON body with the given status.
    pub fn set_json(&self, url: &str, status: u16, json: &str) {
        self.set_response(url, MockResponse::Respond(Response::new(status, json.to_string())));
    }

    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn respond(&self, url: &str) -> Result<Response, NetworkError> {
        let configured = {
            let responses = self.responses.lock().unwrap();
            responses.get(url).cloned().or_else(|| {
                responses
                    .iter()
                    .find(|(pattern, _)| url.starts_with(pattern.as_str()))
                    .map(|(_, response)| response.clone())
            })
        };

        match configured.or_else(|| self.default_response.lock().unwrap().clone()) {
            Some(MockResponse::Respond(response)) => Ok(response),
            Some(MockResponse::Fail(err)) => Err(err),
            None => Err(NetworkError::Other {
                message: format!("No mock response for URL: {}", url),
            }),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, NetworkError> {
        self.record_request("GET", url, headers, None);
        self.respond(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, NetworkError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exact_match_and_recording() {
        let client = MockHttpClient::new();
        client.set_json("https://example.com/a", 200, "{}");

        let response = client.get("https://example.com/a", &Headers::new()).await.unwrap();
        assert_eq!(response.status, 200);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_prefix_match() {
        let client = MockHttpClient::new();
        client.set_json("https://example.com/v1/activities", 200, "{}");

        let response = client
            .get("https://example.com/v1/activities?page=2", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Fail(NetworkError::Cancelled));

        let err = client.post("https://x", "{}", &Headers::new()).await.unwrap_err();
        assert_eq!(err, NetworkError::Cancelled);
        assert_eq!(client.get_requests()[0].body.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_unconfigured_url() {
        let client = MockHttpClient::new();
        assert!(client.get("https://nowhere", &Headers::new()).await.is_err());
    }
}
