//! HTTP transport abstraction.
//!
//! The API client talks to the network only through [`HttpClient`], so
//! tests can swap in [`MockHttpClient`](crate::adapters::mock::MockHttpClient).

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

use crate::error::NetworkError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// An answered request, whatever its status.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport used by the API client.
///
/// Implementations return `Ok` for every response the server sent, including
/// 4xx and 5xx; `Err` is reserved for requests that got no response.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, NetworkError>;

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, NetworkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(304, Bytes::new()).is_success());
        assert!(!Response::new(422, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Page {
            page: u32,
        }

        let response = Response::new(200, r#"{"page":2}"#);
        assert_eq!(response.json::<Page>().unwrap(), Page { page: 2 });
    }

    #[test]
    fn test_response_with_headers() {
        let mut headers = Headers::new();
        headers.insert("X-Request-Id".to_string(), "abc".to_string());
        let response = Response::with_headers(201, headers, Bytes::from_static(b"{}"));
        assert_eq!(response.headers.get("X-Request-Id").map(String::as_str), Some("abc"));
    }
}
