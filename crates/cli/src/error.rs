//! CLI error type.

use jokroup_admin::AdminError;
use jokroup_storefront::api::ApiError;
use jokroup_storefront::config::ConfigError;
use jokroup_storefront::services::{AccountError, AuthError};
use jokroup_storefront::session::SessionError;
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Account(#[from] AccountError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    /// The admin commands need an admin session.
    #[error("Admin access required. Log in with an admin account first.")]
    AdminRequired,

    /// The backend refused an action; the notice has already been logged.
    #[error("{0}")]
    Rejected(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message for the terminal. Backend messages are shown when present;
    /// transport details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e
                .backend_message()
                .unwrap_or("Something went wrong. Please try again.")
                .to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether the failure is worth a Sentry event.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        match self {
            Self::Api(_) | Self::Session(_) | Self::Io(_) => true,
            Self::Admin(AdminError::Api(e)) => e.is_transport(),
            Self::Admin(_) => true,
            Self::Auth(e) => !e.is_validation(),
            Self::Account(e) => !e.is_validation(),
            Self::Config(_) | Self::AdminRequired | Self::Rejected(_) => false,
        }
    }
}
