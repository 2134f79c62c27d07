//! Admin dashboard: headline counts and recent activity.

use std::collections::HashSet;

use jokroup_core::{Coupon, Product, Role, User, format_price};
use jokroup_storefront::AppState;
use jokroup_storefront::store::{Action, StoreState};
use tracing::{info, instrument, warn};

use super::load_rows;
use crate::error::Result;

/// How many recent products and users the dashboard lists.
const RECENT_LIMIT: usize = 5;

/// Dashboard metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub products: usize,
    pub in_stock: usize,
    pub users: usize,
    /// Accounts with the `user` role.
    pub customers: usize,
    pub active_coupons: usize,
    pub total_coupons: usize,
    /// Wishlist entries held by the current session.
    pub wishlist_items: usize,
    pub wishlisted_products: usize,
}

impl DashboardMetrics {
    #[must_use]
    pub fn from_state(state: &StoreState) -> Self {
        let wishlisted: HashSet<_> = state.wishlist.iter().map(|w| &w.product_id).collect();
        Self {
            products: state.products.len(),
            in_stock: state.products.iter().filter(|p| p.in_stock).count(),
            users: state.users.len(),
            customers: state.users.iter().filter(|u| u.role == Role::User).count(),
            active_coupons: state.coupons.iter().filter(|c| c.active).count(),
            total_coupons: state.coupons.len(),
            wishlist_items: state.wishlist.len(),
            wishlisted_products: wishlisted.len(),
        }
    }
}

/// Dashboard view model.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    /// Most recently listed products, newest first.
    pub recent_products: Vec<Product>,
    /// Most recently created accounts, newest first.
    pub recent_users: Vec<User>,
}

impl Dashboard {
    #[must_use]
    pub fn from_state(state: &StoreState) -> Self {
        let mut recent_users = state.users.clone();
        recent_users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_users.truncate(RECENT_LIMIT);

        Self {
            metrics: DashboardMetrics::from_state(state),
            // Listings carry no timestamp; the backend returns newest last.
            recent_products: state.products.iter().rev().take(RECENT_LIMIT).cloned().collect(),
            recent_users,
        }
    }

    /// Plain-text rendering for the CLI.
    #[must_use]
    pub fn render(&self) -> String {
        let m = &self.metrics;
        let mut lines = vec![
            format!("Products:      {} ({} in stock)", m.products, m.in_stock),
            format!("Users:         {} ({} customers)", m.users, m.customers),
            format!("Coupons:       {} active of {}", m.active_coupons, m.total_coupons),
            format!(
                "Wishlist:      {} items, {} products",
                m.wishlist_items, m.wishlisted_products
            ),
        ];
        if !self.recent_products.is_empty() {
            lines.push(String::new());
            lines.push("Recent products".to_string());
            lines.extend(
                self.recent_products
                    .iter()
                    .map(|p| format!("  {}  {}", p.name, format_price(p.effective_price()))),
            );
        }
        if !self.recent_users.is_empty() {
            lines.push(String::new());
            lines.push("Recent users".to_string());
            lines.extend(
                self.recent_users
                    .iter()
                    .map(|u| format!("  {}  {}", u.full_name(), u.email)),
            );
        }
        lines.join("\n")
    }
}

/// Fetch products, users and coupons concurrently and publish them to the
/// store. A collection that fails to load is logged and left as it was.
///
/// # Errors
///
/// Returns the first error only when every collection failed.
#[instrument(skip(state))]
pub async fn load_dashboard(state: &AppState) -> Result<Dashboard> {
    let api = state.api();
    let (products, users, coupons) = tokio::join!(
        load_rows::<Product>(api),
        load_rows::<User>(api),
        load_rows::<Coupon>(api),
    );

    let store = state.store();
    let mut first_error = None;
    let mut loaded = 0;

    match products {
        Ok(rows) => {
            store.dispatch(Action::SetProducts(rows));
            loaded += 1;
        }
        Err(e) => {
            warn!(error = %e, "Dashboard could not load products");
            first_error.get_or_insert(e);
        }
    }
    match users {
        Ok(rows) => {
            store.dispatch(Action::SetUsers(rows));
            loaded += 1;
        }
        Err(e) => {
            warn!(error = %e, "Dashboard could not load users");
            first_error.get_or_insert(e);
        }
    }
    match coupons {
        Ok(rows) => {
            store.dispatch(Action::SetCoupons(rows));
            loaded += 1;
        }
        Err(e) => {
            warn!(error = %e, "Dashboard could not load coupons");
            first_error.get_or_insert(e);
        }
    }

    if loaded == 0 {
        if let Some(e) = first_error {
            e.report();
            return Err(e);
        }
    }

    info!(loaded, "Dashboard loaded");
    Ok(store.with(Dashboard::from_state))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jokroup_core::ProductId;

    fn state() -> StoreState {
        let products: Vec<Product> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Kurta", "price": 1200},
            {"id": 2, "name": "Saree", "price": 2400, "inStock": false},
            {"id": 3, "name": "Dupatta", "price": 600}
        ]))
        .unwrap();
        let users: Vec<User> = serde_json::from_value(serde_json::json!([
            {"id": 1, "firstName": "Admin", "lastName": "User", "email": "admin@example.com",
             "role": "admin", "createdAt": "2025-01-01T00:00:00Z"},
            {"id": 2, "firstName": "John", "lastName": "Doe", "email": "john@example.com",
             "role": "user", "createdAt": "2025-06-01T00:00:00Z"}
        ]))
        .unwrap();
        let coupons: Vec<Coupon> = serde_json::from_value(serde_json::json!([
            {"id": 1, "code": "A", "active": true},
            {"id": 2, "code": "B", "active": false}
        ]))
        .unwrap();

        let mut state = StoreState::default();
        state.apply(Action::SetProducts(products));
        state.apply(Action::SetUsers(users));
        state.apply(Action::SetCoupons(coupons));
        state.apply(Action::AddToWishlist(ProductId::new("1")));
        state.apply(Action::AddToWishlist(ProductId::new("3")));
        state
    }

    #[test]
    fn test_metrics() {
        let metrics = DashboardMetrics::from_state(&state());
        assert_eq!(
            metrics,
            DashboardMetrics {
                products: 3,
                in_stock: 2,
                users: 2,
                customers: 1,
                active_coupons: 1,
                total_coupons: 2,
                wishlist_items: 2,
                wishlisted_products: 2,
            }
        );
    }

    #[test]
    fn test_recent_lists() {
        let dashboard = Dashboard::from_state(&state());
        assert_eq!(dashboard.recent_products[0].name, "Dupatta");
        assert_eq!(dashboard.recent_users[0].first_name, "John");
        assert!(dashboard.render().contains("Coupons:       1 active of 2"));
    }

    #[test]
    fn test_empty_dashboard_renders_counts_only() {
        let rendered = Dashboard::from_state(&StoreState::default()).render();
        assert!(rendered.starts_with("Products:      0 (0 in stock)"));
        assert!(!rendered.contains("Recent"));
    }
}
