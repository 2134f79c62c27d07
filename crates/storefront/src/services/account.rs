//! Account settings: password change, password recovery and notification
//! preferences.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::api::ApiError;
use crate::notice::Notice;
use crate::state::AppState;

/// Minimum length of a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const FORGOT_PASSWORD_SENT: &str = "If the email exists, a reset link has been sent.";
const RESET_PASSWORD_DONE: &str = "Password reset successful!";
const CHANGE_PASSWORD_FAILED: &str = "Failed to update password. Please try again.";
const SERVER_ERROR: &str = "Server error";

/// Errors from account operations. The display text is the message shown to
/// the user.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("All password fields are required.")]
    MissingFields,

    #[error("New password and confirmation do not match.")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,

    #[error("You must be logged in to change your password.")]
    NotLoggedIn,

    #[error("Invalid or missing token")]
    MissingResetToken,

    #[error("Email is required")]
    MissingEmail,

    #[error("Password is required")]
    MissingPassword,

    /// The backend refused the request, or could not be reached.
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl AccountError {
    /// Whether this is an input problem caught before any request was made.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// The destructive notice shown for this error.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::error("Error", self.to_string())
    }
}

/// Password change form input.
#[derive(Debug)]
pub struct ChangePasswordForm {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

/// Which notification preference to flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Email,
    Offers,
    Updates,
}

/// Notification preferences. Kept on the client only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub offers: bool,
    pub updates: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            offers: true,
            updates: false,
        }
    }
}

impl NotificationPreferences {
    /// Flip one preference and return its new value.
    pub const fn toggle(&mut self, kind: NotificationKind) -> bool {
        let flag = match kind {
            NotificationKind::Email => &mut self.email,
            NotificationKind::Offers => &mut self.offers,
            NotificationKind::Updates => &mut self.updates,
        };
        *flag = !*flag;
        *flag
    }
}

/// Account settings service.
pub struct AccountService<'a> {
    state: &'a AppState,
}

impl<'a> AccountService<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Change the logged-in user's password.
    ///
    /// Input is validated before the session is checked, so a logged-out
    /// user still sees field errors first.
    ///
    /// # Errors
    ///
    /// Returns a validation variant of `AccountError` for bad input or a
    /// missing session, and `AccountError::Rejected` carrying the backend's
    /// `message` (or a generic message) if the request fails.
    #[instrument(skip_all)]
    pub async fn change_password(&self, form: &ChangePasswordForm) -> Result<Notice, AccountError> {
        let current = form.current_password.expose_secret();
        let new = form.new_password.expose_secret();
        let confirm = form.confirm_password.expose_secret();

        if current.is_empty() || new.is_empty() || confirm.is_empty() {
            return Err(AccountError::MissingFields);
        }
        if new != confirm {
            return Err(AccountError::PasswordMismatch);
        }
        if new.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort);
        }

        let token = self
            .state
            .store()
            .with(|s| s.current_user.as_ref().and_then(|u| u.token.clone()))
            .ok_or(AccountError::NotLoggedIn)?;

        match self.state.api().change_password(&token, current, new).await {
            Ok(_) => {
                info!("Password changed");
                Ok(Notice::info(
                    "Password Updated",
                    "Your password has been updated successfully.",
                ))
            }
            Err(e) => {
                error!(error = %e, "Password change failed");
                let message = e.field("message").unwrap_or(CHANGE_PASSWORD_FAILED).to_owned();
                Err(AccountError::Rejected { message, source: e })
            }
        }
    }

    /// Ask the backend to email a reset link. Returns the confirmation
    /// message to display.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::MissingEmail` for an empty address and
    /// `AccountError::Rejected` with the backend's `detail` (or a generic
    /// message) on failure.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<String, AccountError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AccountError::MissingEmail);
        }

        match self.state.api().forgot_password(email).await {
            Ok(body) => Ok(string_field(&body, "msg").unwrap_or(FORGOT_PASSWORD_SENT).to_owned()),
            Err(e) => {
                error!(error = %e, "Forgot password request failed");
                let message = failure_message(&e, "Something went wrong");
                Err(AccountError::Rejected { message, source: e })
            }
        }
    }

    /// Set a new password with a reset token from an email link. Returns the
    /// confirmation message to display.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::MissingResetToken` when no token is given,
    /// `AccountError::MissingPassword` for an empty password, and
    /// `AccountError::Rejected` with the backend's `detail` (or a generic
    /// message) on failure.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        token: Option<&str>,
        new_password: &SecretString,
    ) -> Result<String, AccountError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AccountError::MissingResetToken)?;
        let new_password = new_password.expose_secret();
        if new_password.is_empty() {
            return Err(AccountError::MissingPassword);
        }

        match self.state.api().reset_password(token, new_password).await {
            Ok(body) => Ok(string_field(&body, "msg").unwrap_or(RESET_PASSWORD_DONE).to_owned()),
            Err(e) => {
                error!(error = %e, "Password reset failed");
                let message = failure_message(&e, "Failed to reset password");
                Err(AccountError::Rejected { message, source: e })
            }
        }
    }
}

fn string_field<'v>(body: &'v serde_json::Value, name: &str) -> Option<&'v str> {
    body.get(name).and_then(serde_json::Value::as_str)
}

/// A rejection with a JSON body shows its `detail` or `fallback`; anything
/// else (no response, unreadable body) is a server error.
fn failure_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Status { body: Some(_), .. } => {
            err.field("detail").unwrap_or(fallback).to_owned()
        }
        _ => SERVER_ERROR.to_owned(),
    }
}
