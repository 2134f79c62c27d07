//! Login and password endpoints.

use jokroup_core::{SessionToken, User};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiClient, ApiError, paths};

/// Form-encoded login credentials.
#[derive(Serialize)]
pub struct LoginForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(default, alias = "access_token")]
    pub token: Option<SessionToken>,
}

#[derive(Serialize)]
struct ChangePasswordBody<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordBody<'a> {
    token: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    /// Post credentials to the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend rejects the
    /// credentials, or the response is not a login payload.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn login(&self, form: &LoginForm<'_>) -> Result<AuthResponse, ApiError> {
        let payload = self.post_form(paths::LOGIN, form).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Change the password of the account owning `token`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        token: &SessionToken,
        old_password: &str,
        new_password: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let body = ChangePasswordBody {
            old_password,
            new_password,
        };
        self.post_json_authorized(paths::CHANGE_PASSWORD, &body, token)
            .await
    }

    /// Request a password reset email.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<serde_json::Value, ApiError> {
        self.post_json(paths::FORGOT_PASSWORD, &ForgotPasswordBody { email })
            .await
    }

    /// Set a new password using a reset token.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.post_json(
            paths::RESET_PASSWORD,
            &ResetPasswordBody {
                token,
                new_password,
            },
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_accepts_access_token() {
        let response: AuthResponse = serde_json::from_value(serde_json::json!({
            "user": {
                "id": 42,
                "first_name": "Asha",
                "last_name": "Rao",
                "email": "asha@example.com",
                "role": "user",
                "created_at": "2025-01-02T03:04:05Z",
                "password": "ignored"
            },
            "access_token": "jwt-abc"
        }))
        .unwrap();
        assert_eq!(response.user.id.as_str(), "42");
        assert_eq!(response.token.unwrap().expose(), "jwt-abc");
    }

    #[test]
    fn test_change_password_body_shape() {
        let body = ChangePasswordBody {
            old_password: "old",
            new_password: "new-secret",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "old_password": "old", "new_password": "new-secret" })
        );
    }
}
