//! REST client for the Jokroup backend.
//!
//! # Architecture
//!
//! - One shared `reqwest::Client` behind an `Arc`, cheap to clone
//! - Endpoint paths are joined onto the configured base URL
//! - The bearer token is held by the client and attached to every request
//!   once set, mirroring a default `Authorization` header
//! - Responses are JSON; non-success statuses keep the decoded body so
//!   callers can surface the backend's `message`/`msg`/`detail` field
//!
//! # Example
//!
//! ```rust,ignore
//! use jokroup_storefront::api::ApiClient;
//!
//! let api = ApiClient::new(&config)?;
//! let products = api.list_all_products().await?;
//! ```

mod admin;
mod catalog;
pub mod paths;
mod users;

pub use users::{AuthResponse, LoginForm};

use std::sync::{Arc, PoisonError, RwLock};

use jokroup_core::SessionToken;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::StorefrontConfig;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned status {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response decoded but did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedShape(String),
}

impl ApiError {
    /// A string field from the error body, if the backend sent one.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Status {
                body: Some(body), ..
            } => body.get(name).and_then(serde_json::Value::as_str),
            _ => None,
        }
    }

    /// The first human-readable message in the error body.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        ["message", "detail", "msg"]
            .into_iter()
            .find_map(|name| self.field(name))
    }

    /// HTTP status, when the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether no response was received (connection refused, timeout, ...).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Client for the Jokroup REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    bearer: RwLock<Option<SessionToken>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authorized", &self.bearer().is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jokroup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
                bearer: RwLock::new(None),
            }),
        })
    }

    /// Base URL all endpoint paths are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Bearer Header
    // =========================================================================

    /// Attach `token` to every subsequent request.
    pub fn set_bearer(&self, token: SessionToken) {
        *self
            .inner
            .bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Stop sending an `Authorization` header.
    pub fn clear_bearer(&self) {
        *self
            .inner
            .bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The token currently attached to requests.
    #[must_use]
    pub fn bearer(&self) -> Option<SessionToken> {
        self.inner
            .bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // =========================================================================
    // Request Helpers
    // =========================================================================

    /// Build the URL for `path` with optional query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not form a valid URL.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Build `{collection}/{id}`, with `id` escaped as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns error if the collection path cannot be joined onto the base
    /// URL.
    pub fn item_endpoint(&self, collection: &str, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(collection, &[])?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match self.bearer() {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    /// `GET` a JSON document.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(path, query)?;
        let response = self.request(reqwest::Method::GET, url).send().await?;
        Self::handle_response(response).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(path, &[])?;
        let response = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// `POST` a JSON body with an explicit bearer token, regardless of the
    /// token currently attached to the client.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, body, token), fields(path = %path))]
    pub async fn post_json_authorized<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: &SessionToken,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(path, &[])?;
        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// `POST` a form-encoded body.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, form), fields(path = %path))]
    pub async fn post_form<F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(path, &[])?;
        let response = self
            .request(reqwest::Method::POST, url)
            .form(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// `DELETE` one item of a collection.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(collection = %collection))]
    pub async fn delete_item(&self, collection: &str, id: &str) -> Result<(), ApiError> {
        let url = self.item_endpoint(collection, id)?;
        let response = self.request(reqwest::Method::DELETE, url).send().await?;
        Self::handle_response(response).await.map(|_| ())
    }

    /// Decode a response body, turning non-success statuses into
    /// [`ApiError::Status`]. An empty success body decodes as `null`.
    async fn handle_response(response: reqwest::Response) -> Result<serde_json::Value, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(
                status = %status,
                body = %text.chars().take(200).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
