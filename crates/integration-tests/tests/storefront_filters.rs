//! Filter panel and product listing against the mock backend.

#![allow(clippy::unwrap_used)]

use jokroup_integration_tests::MockBackend;
use jokroup_storefront::filter_panel::FilterPanel;
use jokroup_storefront::listing::{ListingTab, ProductListing};
use jokroup_storefront::store::Action;
use serde_json::json;

fn products() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Silk Kurta", "price": 1499, "discountPrice": 1199,
         "category": "men", "colors": ["red"], "sizes": ["M", "L"], "images": ["/static/kurta.jpg"]},
        {"id": 2, "name": "Cotton Saree", "price": 2400, "category": "women",
         "colors": ["blue"], "sizes": ["Free"], "images": "[\"saree.jpg\"]"}
    ])
}

#[tokio::test]
async fn test_apply_with_no_selection_sends_only_price_range() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/v1/product/list", 200, products());
    let state = backend.app_state();

    let mut panel = FilterPanel::new(&state);
    panel.open();
    assert_eq!(panel.apply().await.unwrap(), 2);

    let request = &backend.requests_to("GET", "/api/v1/product/list")[0];
    assert_eq!(
        request.query_pairs(),
        vec![
            ("min_price".to_string(), "0".to_string()),
            ("max_price".to_string(), "5000".to_string()),
        ]
    );
    assert!(!panel.is_open());
}

#[tokio::test]
async fn test_apply_commits_draft_and_filtered_products() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/v1/product/list",
        200,
        json!({"products": [products()[0].clone()]}),
    );
    let state = backend.app_state();

    let mut panel = FilterPanel::new(&state);
    panel.toggle_color("red");
    panel.toggle_color("blue");
    panel.toggle_color("blue");
    panel.toggle_size("M");
    panel.set_price_range(2000, 500);

    assert_eq!(panel.apply().await.unwrap(), 1);

    let request = &backend.requests()[0];
    assert_eq!(
        request.query_pairs(),
        vec![
            ("colors".to_string(), "red".to_string()),
            ("sizes".to_string(), "M".to_string()),
            ("min_price".to_string(), "500".to_string()),
            ("max_price".to_string(), "2000".to_string()),
        ]
    );

    let snapshot = state.store().snapshot();
    assert_eq!(snapshot.filters.colors, vec!["red"]);
    assert_eq!(snapshot.filters.price_range.min(), 500);
    assert_eq!(snapshot.visible_products().len(), 1);
    assert_eq!(snapshot.visible_products()[0].name, "Silk Kurta");
}

#[tokio::test]
async fn test_subscribers_never_see_products_without_their_filters() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/v1/product/list", 200, json!([products()[1].clone()]));
    let state = backend.app_state();
    let mut updates = state.store().subscribe();
    updates.borrow_and_update();

    let mut panel = FilterPanel::new(&state);
    panel.toggle_category("women");
    panel.apply().await.unwrap();

    assert!(updates.has_changed().unwrap());
    {
        let seen = updates.borrow_and_update();
        assert_eq!(seen.filters.categories, vec!["women"]);
        assert_eq!(seen.visible_products().len(), 1);
    }
    // One dispatch, so nothing else is pending
    assert!(!updates.has_changed().unwrap());
}

#[tokio::test]
async fn test_null_priced_product_still_lists() {
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
    let state = backend.app_state();

    let listing = ProductListing::new(&state);
    assert_eq!(listing.mount().await.unwrap(), 2);
    let cards = listing.cards();
    assert_eq!(cards[0].price, "₹1,499");
    assert_eq!(cards[1].price, "N/A");
    assert!(cards[1].original_price.is_none());
}

#[tokio::test]
async fn test_failed_apply_keeps_store_and_draft() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/v1/product/list", 500, json!({"detail": "boom"}));
    let state = backend.app_state();

    let mut panel = FilterPanel::new(&state);
    panel.open();
    panel.toggle_category("women");

    assert!(panel.apply().await.is_err());
    assert!(panel.is_open());
    assert_eq!(panel.draft().categories, vec!["women"]);
    assert!(state.store().snapshot().filters.categories.is_empty());
}

#[tokio::test]
async fn test_reset_restores_defaults_and_reloads() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/v1/product/list", 200, products());
    let state = backend.app_state();

    let mut panel = FilterPanel::new(&state);
    panel.toggle_category("men");
    panel.apply().await.unwrap();

    assert_eq!(panel.reset().await.unwrap(), 2);
    let snapshot = state.store().snapshot();
    assert!(snapshot.filters.is_default());
    assert!(snapshot.filtered_products.is_none());
    assert_eq!(snapshot.products.len(), 2);
    assert!(panel.draft().is_default());

    let last = backend.requests().pop().unwrap();
    assert!(!last.query_pairs().iter().any(|(k, _)| k == "categories"));
}

#[tokio::test]
async fn test_panel_follows_external_filter_changes() {
    let backend = MockBackend::start().await;
    let state = backend.app_state();
    let mut panel = FilterPanel::new(&state);

    let mut filters = state.store().snapshot().filters;
    filters.sizes.push("L".to_string());
    state.store().dispatch(Action::SetFilters(filters));

    assert!(panel.sync_from_store());
    assert_eq!(panel.draft().sizes, vec!["L"]);
    assert!(!panel.sync_from_store());
}

#[tokio::test]
async fn test_load_catalog() {
    let backend = MockBackend::start().await;
    backend.on(
        "GET",
        "/api/v1/cat/list",
        200,
        json!([{"id": 1, "name": "Women", "slug": "women"}]),
    );
    backend.on(
        "GET",
        "/api/v1/cat/subcategory/list",
        200,
        json!([
            {"id": 10, "name": "Sarees", "slug": "sarees", "category_id": 1},
            {"id": 11, "name": "Shirts", "slug": "shirts", "category_id": 2}
        ]),
    );
    let state = backend.app_state();

    let mut panel = FilterPanel::new(&state);
    panel.load_catalog().await.unwrap();
    let catalog = panel.catalog();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].1.len(), 1);
    assert_eq!(catalog[0].1[0].slug, "sarees");
}

#[tokio::test]
async fn test_listing_tabs_load_lazily() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/v1/product/list", 200, products());
    backend.on(
        "GET",
        "/api/v1/product/list?bestSeller=true",
        200,
        json!([{"id": 3, "name": "Dupatta", "price": 600, "bestSeller": true}]),
    );
    backend.on("GET", "/api/v1/product/new-arrivals", 200, json!({"unexpected": true}));
    let state = backend.app_state();

    let mut listing = ProductListing::new(&state);
    listing.mount().await.unwrap();
    assert_eq!(listing.products().len(), 2);

    listing.select_tab(ListingTab::BestSellers).await.unwrap();
    listing.select_tab(ListingTab::BestSellers).await.unwrap();
    assert_eq!(backend.requests_to("GET", "/api/v1/product/list").len(), 2);
    assert_eq!(listing.products()[0].name, "Dupatta");

    // An unrecognised payload is an empty list, so the tab fetches again.
    listing.select_tab(ListingTab::NewArrivals).await.unwrap();
    listing.select_tab(ListingTab::NewArrivals).await.unwrap();
    assert_eq!(backend.requests_to("GET", "/api/v1/product/new-arrivals").len(), 2);
    assert!(listing.cards().is_empty());
}

#[tokio::test]
async fn test_cards_resolve_images_against_static_base() {
    let backend = MockBackend::start().await;
    backend.on("GET", "/api/v1/product/list", 200, products());
    let state = backend.app_state();

    let listing = ProductListing::new(&state);
    listing.mount().await.unwrap();
    let cards = listing.cards();

    let base = backend.url();
    assert_eq!(cards[0].image_url, format!("{base}static/kurta.jpg"));
    assert_eq!(cards[0].badges, vec!["20% Off"]);
    assert_eq!(cards[1].image_url, format!("{base}static/saree.jpg"));
}
