//! Backend API client.
//!
//! Every call is a single-item fallible stream so it drops straight into a
//! view-model pipeline: one `Ok(value)`, or one `Err(ClientError)`.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ErrorEnvelope};
use crate::models::{ActivityEnvelope, CommentsEnvelope, User};
use crate::session::Session;
use crate::traits::{Headers, HttpClient, Response};

/// Body of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenEnvelope {
    pub access_token: String,
    pub user: User,
}

/// Client for the backend REST API.
///
/// Cheap to clone; clones share the transport and the session.
pub struct ApiClient<H> {
    http: Arc<H>,
    base_url: String,
    client_id: String,
    session: Session,
}

impl<H> Clone for ApiClient<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            base_url: self.base_url.clone(),
            client_id: self.client_id.clone(),
            session: self.session.clone(),
        }
    }
}

impl<H> std::fmt::Debug for ApiClient<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl<H: HttpClient + 'static> ApiClient<H> {
    pub fn new(http: H, base_url: impl Into<String>, client_id: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Arc::new(http),
            base_url,
            client_id: client_id.into(),
            session,
        }
    }

    pub fn from_config(http: H, config: &ClientConfig, session: Session) -> Self {
        Self::new(http, &config.api_base_url, &config.client_id, session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// One page of the activity feed. Pages start at 1.
    pub fn fetch_activities(&self, page: u32) -> BoxStream<'static, ClientResult<ActivityEnvelope>> {
        let url = format!("{}/v1/activities?page={}", self.base_url, page);
        self.get(url)
    }

    pub fn fetch_comments(&self, project_id: u64) -> BoxStream<'static, ClientResult<CommentsEnvelope>> {
        let url = format!("{}/v1/projects/{}/comments", self.base_url, project_id);
        self.get(url)
    }

    /// Exchange credentials for an access token.
    ///
    /// The session is left untouched; the caller decides whether to log in.
    pub fn login(&self, email: &str, password: &str) -> BoxStream<'static, ClientResult<AccessTokenEnvelope>> {
        let url = format!("{}/xauth/access_token", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password }).to_string();
        self.post(url, body)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("X-Client-Id".to_string(), self.client_id.clone());
        if let Some(token) = self.session.access_token() {
            headers.insert("Authorization".to_string(), format!("token {}", token));
        }
        headers
    }

    fn get<T>(&self, url: String) -> BoxStream<'static, ClientResult<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let http = Arc::clone(&self.http);
        let headers = self.headers();
        stream::once(async move {
            tracing::debug!(%url, "GET");
            let response = http.get(&url, &headers).await?;
            decode(&url, response)
        })
        .boxed()
    }

    fn post<T>(&self, url: String, body: String) -> BoxStream<'static, ClientResult<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let http = Arc::clone(&self.http);
        let headers = self.headers();
        stream::once(async move {
            tracing::debug!(%url, "POST");
            let response = http.post(&url, &body, &headers).await?;
            decode(&url, response)
        })
        .boxed()
    }
}

/// Map an answered request onto the client's result type.
fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ClientResult<T> {
    if !response.is_success() {
        let envelope = ErrorEnvelope::from_body(response.status, &response.body);
        tracing::debug!(url, status = response.status, "api error response");
        return Err(ClientError::Api(envelope));
    }

    response.json().map_err(|err| {
        tracing::warn!(url, error = %err, "undecodable api response");
        ClientError::from(err)
    })
}
