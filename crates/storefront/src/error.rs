//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type. Request failures are logged and
//! captured to Sentry by [`AppError::report`]; validation failures are only
//! shown to the user.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::account::AccountError;
use crate::services::auth::AuthError;
use crate::session::SessionError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Account operation failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether this is an expected input problem, shown inline rather than
    /// reported.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        match self {
            Self::Auth(err) => err.is_validation(),
            Self::Account(err) => err.is_validation(),
            Self::Api(_) | Self::Session(_) | Self::Config(_) => false,
        }
    }

    /// Message safe to show to the user. Transport details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err
                .backend_message()
                .unwrap_or("Something went wrong. Please try again.")
                .to_string(),
            Self::Auth(AuthError::Session(_)) | Self::Session(_) => {
                "Could not access the saved session".to_string()
            }
            Self::Auth(AuthError::InvalidEmail(_)) => "Invalid email address".to_string(),
            Self::Auth(err) => err.to_string(),
            Self::Account(err) => err.to_string(),
            Self::Config(err) => err.to_string(),
        }
    }

    /// Log the error and, for request failures, capture it to Sentry.
    pub fn report(&self) {
        if self.is_validation() {
            tracing::debug!(error = %self, "Validation error");
            return;
        }

        if matches!(self, Self::Api(_) | Self::Session(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::warn!(error = %self, "Operation failed");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("filters", "Applied filters", Some(&[("colors", "red,blue")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
