//! Application state shared by every page and service.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::StorefrontConfig;
use crate::session::{FileStorage, LocalStorage, SessionPersistence};
use crate::store::Store;

/// Shared application state.
///
/// Cheap to clone; all clones see the same store, API client and session.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    store: Store,
    session: SessionPersistence,
}

impl AppState {
    /// Build the state with file-backed session storage at
    /// `config.session_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let storage = Arc::new(FileStorage::new(config.session_path.clone()));
        Self::with_storage(config, storage)
    }

    /// Build the state on top of an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn LocalStorage>,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                store: Store::default(),
                session: SessionPersistence::new(storage),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    #[must_use]
    pub fn session(&self) -> &SessionPersistence {
        &self.inner.session
    }
}
