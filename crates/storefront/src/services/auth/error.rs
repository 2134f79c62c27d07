//! Authentication error types.

use thiserror::Error;

use crate::session::SessionError;

/// Message shown for any rejected login with both fields filled in.
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Invalid credentials. For demo, use admin@jokroup.com/admin123 or john@example.com/password123";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login rejected, or the backend could not be reached, with both
    /// fields filled in.
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Login failed with an empty field; carries the backend's message or
    /// a generic one.
    #[error("{0}")]
    LoginFailed(String),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] jokroup_core::EmailError),

    /// Password missing or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Session could not be persisted or cleared.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl AuthError {
    /// Whether this is an input problem rather than a failed request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidEmail(_) | Self::WeakPassword(_))
    }
}
