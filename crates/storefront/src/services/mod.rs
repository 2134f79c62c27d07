//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Login (with demo accounts), local registration, logout
//! - `account` - Password change and recovery, notification preferences

pub mod account;
pub mod auth;

pub use account::{AccountError, AccountService, ChangePasswordForm, NotificationPreferences};
pub use auth::{AuthError, AuthService, RegisterForm};
