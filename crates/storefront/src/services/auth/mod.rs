//! Authentication service.
//!
//! Login, registration and logout for the storefront. Two demo accounts are
//! answered locally without contacting the backend; every other login is
//! posted to the backend as a form. Registration is local only.
//!
//! A successful login or registration persists the user (token included),
//! attaches the token to the API client and sets the store's current user.

mod error;

pub use error::{AuthError, INVALID_CREDENTIALS_MESSAGE};

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use jokroup_core::{Email, Role, SessionToken, User, UserId};

use crate::api::{AuthResponse, LoginForm};
use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::state::AppState;
use crate::store::Action;

/// A hardcoded account that logs in without a backend round trip.
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub id: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub role: Role,
    pub token: &'static str,
}

/// The demo accounts, admin first.
pub const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        email: "admin@jokroup.com",
        password: "admin123",
        id: "admin-1",
        first_name: "Admin",
        last_name: "User",
        role: Role::Admin,
        token: "admin-token-123",
    },
    DemoAccount {
        email: "john@example.com",
        password: "password123",
        id: "user-1",
        first_name: "John",
        last_name: "Doe",
        role: Role::User,
        token: "user-token-123",
    },
];

impl DemoAccount {
    /// Find the demo account for a credential pair. The email is compared
    /// case-insensitively, the password exactly.
    #[must_use]
    pub fn find(email: &str, password: &str) -> Option<&'static Self> {
        DEMO_ACCOUNTS
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
    }

    fn to_user(self, now: DateTime<Utc>) -> Result<User, AuthError> {
        Ok(User {
            id: UserId::new(self.id),
            first_name: self.first_name.to_owned(),
            last_name: self.last_name.to_owned(),
            email: Email::parse(self.email)?,
            role: self.role,
            avatar: None,
            addresses: Vec::new(),
            created_at: now,
            token: Some(SessionToken::new(self.token)),
        })
    }
}

/// Registration form input.
#[derive(Debug)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
}

/// Authentication service.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the backend rejects (or
    /// cannot be asked about) a filled-in credential pair, and
    /// `AuthError::LoginFailed` when a field was empty. Returns
    /// `AuthError::Session` if the session cannot be persisted.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let password = password.expose_secret();

        if let Some(account) = DemoAccount::find(email, password) {
            info!(user_id = account.id, "Demo login");
            let user = account.to_user(Utc::now())?;
            self.establish(&user)?;
            return Ok(user);
        }

        let form = LoginForm { email, password };
        match self.state.api().login(&form).await {
            Ok(AuthResponse { mut user, token }) => {
                if token.is_some() {
                    user.token = token;
                }
                info!(user_id = %user.id, "Logged in");
                self.establish(&user)?;
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Login rejected");
                if !email.is_empty() && !password.is_empty() {
                    Err(AuthError::InvalidCredentials)
                } else {
                    Err(AuthError::LoginFailed(
                        e.field("message").unwrap_or("Login failed").to_owned(),
                    ))
                }
            }
        }
    }

    /// Register a new account.
    ///
    /// The account only exists on this client: a user id and token are
    /// generated locally and the backend is never contacted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::WeakPassword` for an empty password, and
    /// `AuthError::Session` if the session cannot be persisted.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub fn register(&self, form: RegisterForm) -> Result<User, AuthError> {
        let email = Email::parse(&form.email)?;
        if form.password.expose_secret().is_empty() {
            return Err(AuthError::WeakPassword("Password is required".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(format!("user-{}", now.timestamp_millis())),
            first_name: form.first_name.trim().to_owned(),
            last_name: form.last_name.trim().to_owned(),
            email,
            role: Role::User,
            avatar: None,
            addresses: Vec::new(),
            created_at: now,
            token: Some(SessionToken::new(format!("user-token-{}", uuid::Uuid::new_v4()))),
        };

        info!(user_id = %user.id, "Registered local account");
        self.establish(&user)?;
        Ok(user)
    }

    /// Log out locally. The token is not revoked on the backend.
    ///
    /// The bearer header and the store are cleared even if the persisted
    /// session cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if the persisted session cannot be
    /// removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        let cleared = self.state.session().clear();

        self.state.api().clear_bearer();
        self.state.store().dispatch(Action::Logout);
        clear_sentry_user();
        add_breadcrumb("auth", "Logged out", None);
        info!("Logged out");

        cleared.map_err(AuthError::from)
    }

    /// Reload a persisted session into the store and API client.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Session` if storage cannot be read.
    pub fn restore(&self) -> Result<Option<User>, AuthError> {
        let Some(user) = self.state.session().load_user()? else {
            return Ok(None);
        };
        self.activate(&user);
        Ok(Some(user))
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.store().with(|s| s.current_user.clone())
    }

    fn establish(&self, user: &User) -> Result<(), AuthError> {
        self.state.session().save_user(user)?;
        self.activate(user);
        Ok(())
    }

    fn activate(&self, user: &User) {
        match &user.token {
            Some(token) => self.state.api().set_bearer(token.clone()),
            None => self.state.api().clear_bearer(),
        }
        self.state
            .store()
            .dispatch(Action::SetCurrentUser(Box::new(user.clone())));
        set_sentry_user(&user.id, Some(user.email.as_str()));
        add_breadcrumb("auth", "Signed in", Some(&[("role", user.role.as_str())]));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use url::Url;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::session::{CURRENT_USER_KEY, LocalStorage, MemoryStorage};

    fn state() -> (AppState, Arc<MemoryStorage>) {
        // Nothing listens here; demo and local flows must not touch it
        let config = StorefrontConfig::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            "/nonexistent/session.json",
        );
        let storage = Arc::new(MemoryStorage::new());
        let state = AppState::with_storage(config, storage.clone()).unwrap();
        (state, storage)
    }

    #[test]
    fn test_demo_account_matching() {
        assert_eq!(
            DemoAccount::find("ADMIN@Jokroup.com", "admin123").unwrap().role,
            Role::Admin
        );
        assert!(DemoAccount::find("admin@jokroup.com", "ADMIN123").is_none());
        assert!(DemoAccount::find(" john@example.com", "password123").is_none());
        assert_eq!(
            DemoAccount::find("john@example.com", "password123").unwrap().id,
            "user-1"
        );
    }

    #[tokio::test]
    async fn test_demo_login_persists_session() {
        let (state, storage) = state();
        let auth = AuthService::new(&state);

        let user = auth
            .login("admin@jokroup.com", &SecretString::from("admin123".to_string()))
            .await
            .unwrap();
        assert!(user.is_admin());
        assert_eq!(user.id.as_str(), "admin-1");

        let raw = storage.get_item(CURRENT_USER_KEY).unwrap().unwrap();
        assert!(raw.contains("admin-token-123"));
        assert_eq!(state.api().bearer().unwrap().expose(), "admin-token-123");
        assert_eq!(auth.current_user().unwrap().id, user.id);
    }

    #[test]
    fn test_register_is_local() {
        let (state, storage) = state();
        let auth = AuthService::new(&state);

        let user = auth
            .register(RegisterForm {
                first_name: " Priya ".into(),
                last_name: "Shah".into(),
                email: "priya@example.com".into(),
                password: SecretString::from("hunter22".to_string()),
            })
            .unwrap();

        assert!(user.id.as_str().starts_with("user-"));
        assert_eq!(user.first_name, "Priya");
        assert_eq!(user.role, Role::User);
        let token = user.token.clone().unwrap();
        assert!(token.expose().starts_with("user-token-"));
        assert_eq!(state.api().bearer(), Some(token));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_register_validates_input() {
        let (state, storage) = state();
        let auth = AuthService::new(&state);

        let err = auth
            .register(RegisterForm {
                first_name: "A".into(),
                last_name: "B".into(),
                email: "not-an-email".into(),
                password: SecretString::from("pw".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));

        let err = auth
            .register(RegisterForm {
                first_name: "A".into(),
                last_name: "B".into(),
                email: "a@b.com".into(),
                password: SecretString::from(String::new()),
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let (state, storage) = state();
        let auth = AuthService::new(&state);
        auth.login("john@example.com", &SecretString::from("password123".to_string()))
            .await
            .unwrap();

        auth.logout().unwrap();
        assert!(storage.is_empty());
        assert!(state.api().bearer().is_none());
        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_restore_reloads_session() {
        let (state, storage) = state();
        AuthService::new(&state)
            .login("john@example.com", &SecretString::from("password123".to_string()))
            .await
            .unwrap();

        let config = state.config().clone();
        let fresh = AppState::with_storage(config, storage).unwrap();
        let restored = AuthService::new(&fresh).restore().unwrap().unwrap();
        assert_eq!(restored.id.as_str(), "user-1");
        assert_eq!(fresh.api().bearer().unwrap().expose(), "user-token-123");
        assert!(fresh.store().snapshot().is_authenticated());
    }
}
