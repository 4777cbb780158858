//! Reqwest-based HTTP client adapter.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{classify_reqwest_error, NetworkError};
use crate::traits::{Headers, HttpClient, Response};

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ReqwestHttpClient {
    /// Create a client whose requests time out after `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|err| NetworkError::Other {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Wrap a preconfigured reqwest client.
    pub fn with_client(client: reqwest::Client, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout_secs,
        }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        headers
            .iter()
            .fold(builder, |builder, (key, value)| builder.header(key, value))
    }

    fn failure(&self, url: &str, err: &reqwest::Error) -> NetworkError {
        let err = classify_reqwest_error(err, url, self.timeout_secs);
        tracing::debug!(url, code = err.error_code(), error = %err, "http request failed");
        err
    }

    async fn send(&self, url: &str, builder: reqwest::RequestBuilder) -> Result<Response, NetworkError> {
        let response = builder.send().await.map_err(|err| self.failure(url, &err))?;

        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(|err| self.failure(url, &err))?;

        tracing::debug!(url, status, bytes = body.len(), "http response");
        Ok(Response::with_headers(status, headers, body))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, NetworkError> {
        let builder = Self::apply_headers(self.client.get(url), headers);
        self.send(url, builder).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, NetworkError> {
        let builder = Self::apply_headers(self.client.post(url).body(body.to_string()), headers);
        self.send(url, builder).await
    }
}
