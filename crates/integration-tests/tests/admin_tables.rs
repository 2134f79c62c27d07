//! Admin tables and dashboard against the mock backend.

#![allow(clippy::unwrap_used)]

use jokroup_admin::{AdminPage, DashboardMetrics, PAGE_SIZE, load_dashboard};
use jokroup_core::{Coupon, Product, Role, User};
use jokroup_integration_tests::MockBackend;
use serde_json::{Value, json};

fn users(n: usize) -> Value {
    let list: Vec<Value> = (1..=n)
        .map(|i| {
            let (first, role) = if i == 1 { ("Admin", "admin") } else { ("Customer", "user") };
            json!({
                "id": i,
                "firstName": first,
                "lastName": format!("Number{i}"),
                "email": format!("person{i}@example.com"),
                "role": role,
                "createdAt": format!("2025-01-{:02}T00:00:00Z", (i % 28) + 1)
            })
        })
        .collect();
    Value::Array(list)
}

#[tokio::test]
async fn test_users_page_search_and_pagination() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/users", 200, users(23));
    let state = backend.app_state();

    let mut page = AdminPage::<User>::load(&state).await;
    assert_eq!(state.store().snapshot().users.len(), 23);

    let table = page.table_mut().unwrap();
    assert_eq!(table.total_pages(), 3);
    assert_eq!(table.page_rows().len(), PAGE_SIZE);

    assert!(table.paginate(3));
    assert_eq!(table.page_rows().len(), 3);
    assert!(!table.paginate(4));
    assert_eq!(table.page(), 3);

    table.set_search("ADMIN");
    assert_eq!(table.page(), 1);
    assert_eq!(table.filtered_len(), 1);

    table.set_search("person2");
    // person2, person20..person23
    assert_eq!(table.filtered_len(), 5);

    assert!(page.render().contains("Showing 1 to 5 of 5 users"));
}

#[tokio::test]
async fn test_users_page_empty_search_state() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/users", 200, users(2));
    let state = backend.app_state();

    let mut page = AdminPage::<User>::load(&state).await;
    page.table_mut().unwrap().set_search("nobody-matches-this");
    let rendered = page.render();
    assert!(rendered.contains("No users found"));
    assert!(rendered.contains("Try adjusting your search or add a new user."));
}

#[tokio::test]
async fn test_non_array_response_is_a_load_error() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/users", 200, json!({"users": []}));
    let state = backend.app_state();

    let page = AdminPage::<User>::load(&state).await;
    assert!(page.table().is_none());
    assert_eq!(
        page.view().error(),
        Some("Failed to load users. Please try again later.")
    );
    assert_eq!(page.render(), "Failed to load users. Please try again later.");
}

#[tokio::test]
async fn test_delete_removes_row_without_refetch() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/users", 200, users(11));
    backend.on("DELETE", "/api/users/11", 200, Value::Null);
    let state = backend.app_state();

    let mut page = AdminPage::<User>::load(&state).await;
    page.table_mut().unwrap().last_page();

    let notice = page.delete("11").await;
    assert_eq!(notice.title, "Success");
    assert_eq!(notice.description, "User deleted successfully");

    let table = page.table().unwrap();
    assert_eq!(table.rows().len(), 10);
    assert_eq!(table.page(), 1);

    // The store drops the row too, so the dashboard counts stay right
    let snapshot = state.store().snapshot();
    assert_eq!(snapshot.users.len(), 10);
    assert!(snapshot.users.iter().all(|u| u.id.as_str() != "11"));
    assert_eq!(DashboardMetrics::from_state(&snapshot).users, 10);
    assert_eq!(backend.requests_to("GET", "/api/users").len(), 1);
    assert_eq!(backend.requests_to("DELETE", "/api/users/11").len(), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_rows() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/users", 200, users(3));
    backend.on("DELETE", "/api/users/2", 500, json!({"detail": "locked"}));
    let state = backend.app_state();

    let mut page = AdminPage::<User>::load(&state).await;
    let notice = page.delete("2").await;
    assert!(notice.is_destructive());
    assert_eq!(notice.description, "Failed to delete user");
    assert_eq!(page.table().unwrap().rows().len(), 3);
    assert_eq!(state.store().snapshot().users.len(), 3);
}

#[tokio::test]
async fn test_row_action_placeholders() {
    let backend = MockBackend::start().await;
    let state = backend.app_state();
    let page = AdminPage::<User>::from_rows(&state, Vec::new());

    assert_eq!(page.edit("7").title, "Edit User");
    assert_eq!(
        page.email("7").description,
        "Emailing user 7. This feature is not implemented in the demo."
    );
    assert_eq!(page.add().title, "Add User");
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn test_products_and_coupons_pages() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/v1/product/list",
        200,
        json!([
            {"id": 1, "name": "Silk Kurta", "price": 1499, "category": "men"},
            {"id": 2, "name": "Cotton Saree", "price": 2400, "category": "women"}
        ]),
    );
    backend.on(
        "GET",
        "/api/v1/coupon/list",
        200,
        json!([{"id": 5, "code": "DIWALI20", "discount": 20, "active": true}]),
    );
    backend.on("DELETE", "/api/v1/coupon/5", 200, Value::Null);
    let state = backend.app_state();

    let mut products = AdminPage::<Product>::load(&state).await;
    products.table_mut().unwrap().set_search("saree");
    assert!(products.render().contains("Cotton Saree"));
    assert!(!products.render().contains("Silk Kurta"));

    let mut coupons = AdminPage::<Coupon>::load(&state).await;
    assert_eq!(state.store().snapshot().coupons.len(), 1);
    assert!(coupons.render().contains("DIWALI20"));
    assert_eq!(coupons.delete("5").await.description, "Coupon deleted successfully");
    assert!(coupons.table().unwrap().rows().is_empty());
    assert!(state.store().snapshot().coupons.is_empty());
}

#[tokio::test]
async fn test_one_odd_row_does_not_break_a_table() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/v1/product/list",
        200,
        json!([
            {"id": 1, "name": "Silk Kurta", "price": 1499},
            {"id": 2, "name": "Mystery Box", "price": null}
        ]),
    );
    backend.on(
        "GET",
        "/api/users",
        200,
        json!([
            {"id": 1, "firstName": "Asha", "lastName": "Rao", "email": "asha@example.com",
             "role": "Admin", "createdAt": "2025-01-01T00:00:00Z"},
            {"id": 2, "firstName": "Ravi", "lastName": "Kumar", "email": "ravi@example.com",
             "role": "customer", "createdAt": "2025-01-02T00:00:00Z"}
        ]),
    );
    let state = backend.app_state();

    let products = AdminPage::<Product>::load(&state).await;
    assert_eq!(products.table().unwrap().rows().len(), 2);
    assert!(products.render().contains("N/A"));

    let mut users = AdminPage::<User>::load(&state).await;
    let rows = users.table().unwrap().rows();
    assert_eq!(rows[0].role, Role::Admin);
    assert_eq!(rows[1].role, Role::User);
    users.table_mut().unwrap().set_search("admin");
    assert_eq!(users.table().unwrap().filtered_len(), 1);
}

#[tokio::test]
async fn test_dashboard_loads_collections_concurrently() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/v1/product/list",
        200,
        json!([
            {"id": 1, "name": "Silk Kurta", "price": 1499},
            {"id": 2, "name": "Cotton Saree", "price": 2400, "inStock": false}
        ]),
    );
    backend.on("GET", "/api/users", 200, users(4));
    // Coupons are not registered; the dashboard still loads.
    let state = backend.app_state();

    let dashboard = load_dashboard(&state).await.unwrap();
    assert_eq!(dashboard.metrics.products, 2);
    assert_eq!(dashboard.metrics.in_stock, 1);
    assert_eq!(dashboard.metrics.users, 4);
    assert_eq!(dashboard.metrics.customers, 3);
    assert_eq!(dashboard.metrics.total_coupons, 0);
    assert_eq!(backend.hits(), 3);
}

#[tokio::test]
async fn test_dashboard_fails_when_nothing_loads() {
    let backend = MockBackend::start().await;
    let state = backend.app_state();
    assert!(load_dashboard(&state).await.is_err());
}
