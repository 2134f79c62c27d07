//! Account types: users, addresses and session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{AddressId, UserId};
use super::role::Role;

/// Opaque session token issued at login.
///
/// Serializes as a plain string so it survives the round trip through local
/// storage, but never prints in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// A postal address saved on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    /// Recipient name.
    pub name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(alias = "postal_code")]
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: String,
    /// Whether this is the account's default shipping address.
    #[serde(rename = "default", default)]
    pub is_default: bool,
}

impl Address {
    /// Short one-line form used in tables: `line1, city`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {}", self.line1, self.city)
    }
}

/// A storefront account as seen by the client.
///
/// The password is never retained client-side; any `password` field in a
/// backend payload is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
    pub email: Email,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SessionToken>,
}

impl User {
    /// `First Last`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Initials used when the account has no avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect()
    }

    /// The default address, falling back to the first one on file.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.addresses.first())
    }

    /// Mark one address as the default, clearing the flag on all others.
    ///
    /// Returns `false` (and changes nothing) if no address has that ID.
    pub fn set_default_address(&mut self, id: &AddressId) -> bool {
        if !self.addresses.iter().any(|a| &a.id == id) {
            return false;
        }
        for address in &mut self.addresses {
            address.is_default = &address.id == id;
        }
        true
    }

    /// Whether the account may use the admin console.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address(id: &str, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            name: "John Doe".to_string(),
            line1: format!("{id} MG Road"),
            line2: None,
            city: "Bengaluru".to_string(),
            state: "KA".to_string(),
            postal_code: "560001".to_string(),
            country: "IN".to_string(),
            phone: String::new(),
            is_default,
        }
    }

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 12,
            "firstName": "John",
            "lastName": "Doe",
            "email": "john@example.com",
            "password": "should-be-dropped",
            "role": "user",
            "addresses": [],
            "createdAt": "2025-01-15T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_password_is_not_retained() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("token").is_none());
    }

    #[test]
    fn test_snake_case_aliases() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "first_name": "Asha",
            "last_name": "Rao",
            "email": "asha@example.com",
            "created_at": "2025-02-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.full_name(), "Asha Rao");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_initials() {
        assert_eq!(user().initials(), "JD");
    }

    #[test]
    fn test_default_address_falls_back_to_first() {
        let mut user = user();
        assert!(user.default_address().is_none());

        user.addresses = vec![address("a1", false), address("a2", false)];
        assert_eq!(user.default_address().unwrap().id.as_str(), "a1");

        user.addresses[1].is_default = true;
        assert_eq!(user.default_address().unwrap().id.as_str(), "a2");
    }

    #[test]
    fn test_set_default_address_keeps_single_default() {
        let mut user = user();
        user.addresses = vec![address("a1", true), address("a2", true), address("a3", false)];

        assert!(user.set_default_address(&AddressId::new("a3")));
        let defaults: Vec<_> = user
            .addresses
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(defaults, vec!["a3"]);

        assert!(!user.set_default_address(&AddressId::new("missing")));
        assert!(user.addresses[2].is_default);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("user-token-123");
        assert_eq!(format!("{token:?}"), "SessionToken([REDACTED])");
        assert_eq!(token.expose(), "user-token-123");
    }
}
