//! Integration tests for Jokroup.
//!
//! Tests run the storefront and admin clients against [`MockBackend`], an
//! in-process `axum` server that answers from canned responses and records
//! every request it receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p jokroup-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockBackend::start().await;
//! backend.on("GET", "/api/users", 200, json!([]));
//! let state = backend.app_state();
//! let page = AdminPage::<User>::load(&state).await;
//! assert_eq!(backend.hits(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use jokroup_storefront::AppState;
use jokroup_storefront::config::StorefrontConfig;
use jokroup_storefront::session::{LocalStorage, MemoryStorage};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Query parameters in order, decoded.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let query = self.query.as_deref().unwrap_or_default();
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// The body parsed as JSON, if it is JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// The body parsed as a URL-encoded form.
    #[must_use]
    pub fn form(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: Value,
}

#[derive(Debug, Clone, Default)]
struct Shared {
    /// Keyed by `(METHOD, path)` or `(METHOD, path?query)`.
    routes: Arc<Mutex<HashMap<(String, String), CannedResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process backend for integration tests.
///
/// Unregistered routes answer `404` with `{"detail": "Not Found"}`. A canned
/// `null` body is sent as an empty response.
pub struct MockBackend {
    addr: SocketAddr,
    shared: Shared,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to an ephemeral localhost port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener
            .local_addr()
            .expect("Mock backend has no local address");

        let shared = Shared::default();
        let app = Router::new()
            .fallback(respond)
            .with_state(shared.clone());

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            shared,
            server,
        }
    }

    /// Base URL with a trailing slash.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("Mock backend URL is valid")
    }

    /// Register a canned response. `path` may include a query string to
    /// match only that exact query; otherwise any query matches.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.shared
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                (method.to_ascii_uppercase(), path.to_owned()),
                CannedResponse { status, body },
            );
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.shared
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Requests received for one method and path.
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.eq_ignore_ascii_case(method) && r.path == path)
            .collect()
    }

    /// Storefront config pointing at this backend.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig::new(self.url(), "unused-session.json")
    }

    /// Application state pointing at this backend, with in-memory session
    /// storage.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        self.app_state_with(Arc::new(MemoryStorage::new()))
    }

    /// Application state pointing at this backend over the given storage.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn app_state_with(&self, storage: Arc<dyn LocalStorage>) -> AppState {
        AppState::with_storage(self.config(), storage).expect("Failed to build app state")
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn respond(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
    };

    let path = uri.path().to_owned();
    let query = uri.query().map(ToOwned::to_owned);
    let method = method.as_str().to_owned();

    shared
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query: query.clone(),
            authorization: header_str(header::AUTHORIZATION),
            content_type: header_str(header::CONTENT_TYPE),
            body: String::from_utf8_lossy(&body).into_owned(),
        });

    let canned = {
        let routes = shared.routes.lock().unwrap_or_else(PoisonError::into_inner);
        query
            .as_ref()
            .and_then(|q| routes.get(&(method.clone(), format!("{path}?{q}"))))
            .or_else(|| routes.get(&(method, path)))
            .cloned()
    };

    match canned {
        Some(CannedResponse {
            status,
            body: Value::Null,
        }) => status.into_response(),
        Some(CannedResponse { status, body }) => (status, axum::Json(body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({"detail": "Not Found"})),
        )
            .into_response(),
    }
}
