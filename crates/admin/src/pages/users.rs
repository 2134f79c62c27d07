//! Users admin page.

use jokroup_core::{User, UserId};
use jokroup_storefront::api::{ApiClient, ApiError};
use jokroup_storefront::store::Action;
use jokroup_storefront::{AppState, Notice};
use url::Url;

use super::{AdminPage, AdminResource, NOT_IMPLEMENTED};
use crate::components::DataTableConfig;
use crate::components::data_table::users_table_config;
use crate::table::{Searchable, contains_ignore_case};

impl Searchable for User {
    fn row_id(&self) -> &str {
        self.id.as_str()
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.full_name(), needle)
            || contains_ignore_case(self.email.as_str(), needle)
            || contains_ignore_case(self.role.as_str(), needle)
    }
}

impl AdminResource for User {
    const NOUN: &'static str = "users";
    const SINGULAR: &'static str = "User";

    async fn fetch(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
        api.list_users().await
    }

    async fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete_user(&UserId::new(id)).await
    }

    fn store_action(rows: &[Self]) -> Option<Action> {
        Some(Action::SetUsers(rows.to_vec()))
    }

    fn removal_action(id: &str) -> Option<Action> {
        Some(Action::RemoveUser(UserId::new(id)))
    }

    fn cells(&self, state: &AppState) -> Vec<String> {
        let view = UserView::new(self, state.api().base_url());
        vec![
            view.id,
            view.name,
            view.email,
            view.role,
            view.address.unwrap_or_else(|| "No address".to_string()),
            view.joined,
        ]
    }

    fn table_config() -> DataTableConfig {
        users_table_config()
    }
}

impl AdminPage<User> {
    /// Row action placeholder for emailing a user.
    #[must_use]
    pub fn email(&self, id: &str) -> Notice {
        Notice::info("Email User", format!("Emailing user {id}. {NOT_IMPLEMENTED}"))
    }
}

/// User row as displayed in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Shown when the account has no avatar.
    pub initials: String,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub joined: String,
}

impl UserView {
    #[must_use]
    pub fn new(user: &User, api_base: &Url) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.full_name(),
            email: user.email.to_string(),
            role: user.role.to_string(),
            initials: user.initials(),
            avatar_url: user.avatar.as_deref().map(|a| avatar_url(api_base, a)),
            address: user.default_address().map(jokroup_core::Address::summary),
            joined: user.created_at.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Absolute avatar URL. Paths are served from the API host.
#[must_use]
pub fn avatar_url(api_base: &Url, avatar: &str) -> String {
    if avatar.starts_with("http") {
        avatar.to_owned()
    } else {
        format!("{api_base}{}", avatar.trim_start_matches('/'))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::table::AdminTable;

    fn user(id: &str, first: &str, last: &str, email: &str, role: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "firstName": first,
            "lastName": last,
            "email": email,
            "role": role,
            "createdAt": "2025-03-04T09:00:00Z",
            "addresses": [{
                "id": "a1",
                "name": format!("{first} {last}"),
                "line1": "12 MG Road",
                "city": "Pune",
                "state": "MH",
                "postalCode": "411001",
                "country": "IN"
            }]
        }))
        .unwrap()
    }

    fn users() -> Vec<User> {
        vec![
            user("1", "Admin", "User", "admin@example.com", "admin"),
            user("2", "John", "Doe", "john@example.com", "user"),
            user("3", "Priya", "Sharma", "priya@shop.in", "user"),
        ]
    }

    #[test]
    fn test_search_by_name_email_or_role() {
        let mut table = AdminTable::new(users());

        table.set_search("JOHN DOE");
        assert_eq!(table.filtered_len(), 1);

        table.set_search("shop.in");
        assert_eq!(table.page_rows()[0].id.as_str(), "3");

        table.set_search("Admin");
        assert_eq!(table.filtered_len(), 1);

        table.set_search("USER");
        assert_eq!(table.filtered_len(), 3);

        table.set_search("Pune");
        assert_eq!(table.filtered_len(), 0);
    }

    #[test]
    fn test_user_view() {
        let base = Url::parse("http://localhost:8000/").unwrap();
        let mut john = user("2", "John", "Doe", "john@example.com", "user");
        john.avatar = Some("/uploads/john.png".to_string());

        let view = UserView::new(&john, &base);
        assert_eq!(view.name, "John Doe");
        assert_eq!(view.initials, "JD");
        assert_eq!(view.address.as_deref(), Some("12 MG Road, Pune"));
        assert_eq!(view.joined, "Mar 4, 2025");
        assert_eq!(
            view.avatar_url.as_deref(),
            Some("http://localhost:8000/uploads/john.png")
        );
    }

    #[test]
    fn test_avatar_url_passthrough() {
        let base = Url::parse("http://localhost:8000/").unwrap();
        assert_eq!(
            avatar_url(&base, "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }
}
