//! Error handling for the admin console.

use jokroup_storefront::api::ApiError;
use thiserror::Error;

/// Admin console error type.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Request to the backend failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Collection endpoint answered with something other than an array.
    #[error("Invalid API response format")]
    InvalidResponse,

    /// An element of the collection did not decode.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AdminError {
    /// Log the error and, for request failures, capture it to Sentry.
    pub fn report(&self) {
        if matches!(self, Self::Api(e) if !e.is_transport()) {
            tracing::warn!(error = %self, "Admin request rejected");
            return;
        }
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Admin request error"
        );
    }
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
