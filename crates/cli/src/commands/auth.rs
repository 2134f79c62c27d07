//! Login, registration and session commands.
//!
//! # Usage
//!
//! ```bash
//! jk-cli auth login -e admin@jokroup.com -p admin123
//! jk-cli auth whoami
//! jk-cli auth logout
//! ```

use std::io::Write;

use jokroup_storefront::AppState;
use jokroup_storefront::services::{AuthService, RegisterForm};
use secrecy::SecretString;

use crate::error::CliError;

/// Log in and persist the session.
///
/// # Errors
///
/// Returns error if the credentials are rejected or the session cannot be
/// saved.
pub async fn login(
    state: &AppState,
    out: &mut impl Write,
    email: &str,
    password: String,
) -> Result<(), CliError> {
    let user = AuthService::new(state)
        .login(email, &SecretString::from(password))
        .await?;
    writeln!(out, "Logged in as {} ({})", user.full_name(), user.role)?;
    Ok(())
}

/// Create a local account and log in with it.
///
/// # Errors
///
/// Returns error for an invalid email, an empty password, or if the
/// session cannot be saved.
pub fn register(
    state: &AppState,
    out: &mut impl Write,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let user = AuthService::new(state).register(RegisterForm {
        first_name,
        last_name,
        email,
        password: SecretString::from(password),
    })?;
    writeln!(out, "Registered {} <{}>", user.full_name(), user.email)?;
    Ok(())
}

/// Clear the persisted session.
///
/// # Errors
///
/// Returns error if the session file cannot be updated.
pub fn logout(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    AuthService::new(state).logout()?;
    writeln!(out, "Logged out")?;
    Ok(())
}

/// Show the logged-in account.
///
/// # Errors
///
/// Returns error if the output cannot be written.
pub fn whoami(state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    match AuthService::new(state).current_user() {
        Some(user) => writeln!(
            out,
            "{} <{}>\nRole: {}\nID:   {}",
            user.full_name(),
            user.email,
            user.role,
            user.id
        )?,
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}
