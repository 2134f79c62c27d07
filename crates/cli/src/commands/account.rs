//! Account settings commands.
//!
//! # Usage
//!
//! ```bash
//! jk-cli account change-password --current old --new secret1 --confirm secret1
//! jk-cli account forgot-password -e john@example.com
//! jk-cli account reset-password --token abc --password secret1
//! ```

use std::io::Write;

use jokroup_storefront::AppState;
use jokroup_storefront::services::{AccountService, ChangePasswordForm};
use secrecy::SecretString;

use super::write_notice;
use crate::error::CliError;

/// Change the logged-in user's password.
///
/// # Errors
///
/// Returns error for invalid input, a missing session, or a rejected
/// request.
pub async fn change_password(
    state: &AppState,
    out: &mut impl Write,
    current: String,
    new: String,
    confirm: String,
) -> Result<(), CliError> {
    let form = ChangePasswordForm {
        current_password: SecretString::from(current),
        new_password: SecretString::from(new),
        confirm_password: SecretString::from(confirm),
    };
    let notice = AccountService::new(state).change_password(&form).await?;
    write_notice(out, &notice)
}

/// Request a password reset email.
///
/// # Errors
///
/// Returns error for an empty email or a failed request.
pub async fn forgot_password(state: &AppState, out: &mut impl Write, email: &str) -> Result<(), CliError> {
    let message = AccountService::new(state).forgot_password(email).await?;
    writeln!(out, "{message}")?;
    Ok(())
}

/// Set a new password with a reset token.
///
/// # Errors
///
/// Returns error for a missing token or password, or a failed request.
pub async fn reset_password(
    state: &AppState,
    out: &mut impl Write,
    token: Option<&str>,
    password: String,
) -> Result<(), CliError> {
    let message = AccountService::new(state)
        .reset_password(token, &SecretString::from(password))
        .await?;
    writeln!(out, "{message}")?;
    Ok(())
}
