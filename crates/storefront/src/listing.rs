//! Product listing: the all / new arrivals / best sellers tabs and the
//! per-product card view.

use jokroup_core::{Price, Product, ProductId, format_price};
use tracing::{debug, error, instrument};
use url::Url;

use crate::api::ApiError;
use crate::notice::Notice;
use crate::state::AppState;
use crate::store::{Action, StoreState};

/// Image shown when a product has none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

/// Listing tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingTab {
    #[default]
    All,
    NewArrivals,
    BestSellers,
}

impl ListingTab {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Products",
            Self::NewArrivals => "New Arrivals",
            Self::BestSellers => "Best Sellers",
        }
    }
}

/// Tabbed product listing backed by the store's product collections.
#[derive(Debug)]
pub struct ProductListing {
    state: AppState,
    tab: ListingTab,
}

impl ProductListing {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            tab: ListingTab::All,
        }
    }

    #[must_use]
    pub const fn tab(&self) -> ListingTab {
        self.tab
    }

    /// Load the full listing.
    ///
    /// # Errors
    ///
    /// Returns the request error after logging it; the store keeps its
    /// previous listing.
    #[instrument(skip(self))]
    pub async fn mount(&self) -> Result<usize, ApiError> {
        match self.state.api().list_all_products().await {
            Ok(products) => {
                let count = products.len();
                self.state.store().dispatch(Action::SetProducts(products));
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Error fetching all products");
                Err(e)
            }
        }
    }

    /// Switch tabs. New arrivals and best sellers are fetched the first time
    /// their tab is shown, and again only while their collection is empty.
    ///
    /// # Errors
    ///
    /// Returns the request error after logging it; the tab still switches.
    #[instrument(skip(self))]
    pub async fn select_tab(&mut self, tab: ListingTab) -> Result<(), ApiError> {
        self.tab = tab;
        let store = self.state.store();
        let api = self.state.api();

        match tab {
            ListingTab::All => Ok(()),
            ListingTab::NewArrivals => {
                if !store.with(|s| s.new_arrivals.is_empty()) {
                    debug!("New arrivals already loaded");
                    return Ok(());
                }
                let products = api.new_arrivals().await.inspect_err(|e| {
                    error!(error = %e, "Error fetching new arrival products");
                })?;
                store.dispatch(Action::SetNewArrivals(products));
                Ok(())
            }
            ListingTab::BestSellers => {
                if !store.with(|s| s.best_sellers.is_empty()) {
                    debug!("Best sellers already loaded");
                    return Ok(());
                }
                let products = api.best_sellers().await.inspect_err(|e| {
                    error!(error = %e, "Error fetching best seller products");
                })?;
                store.dispatch(Action::SetBestSellers(products));
                Ok(())
            }
        }
    }

    /// Products for the current tab. The all tab shows the filtered result
    /// once filters have been applied.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.state.store().with(|s| match self.tab {
            ListingTab::All => s.visible_products().to_vec(),
            ListingTab::NewArrivals => s.new_arrivals.clone(),
            ListingTab::BestSellers => s.best_sellers.clone(),
        })
    }

    /// Card views for the current tab.
    #[must_use]
    pub fn cards(&self) -> Vec<ProductCard> {
        let base = self.state.config().static_url().ok();
        let snapshot = self.state.store().snapshot();
        self.products()
            .iter()
            .map(|p| ProductCard::new(p, base.as_ref(), &snapshot))
            .collect()
    }
}

/// Add or remove a product from the wishlist, returning the notice to show.
pub fn toggle_wishlist(state: &AppState, product: &Product) -> Notice {
    let store = state.store();
    if store.with(|s| s.is_in_wishlist(&product.id)) {
        store.dispatch(Action::RemoveFromWishlist(product.id.clone()));
        Notice::info(
            "Removed from Wishlist",
            format!("{} removed from your wishlist.", product.name),
        )
    } else {
        store.dispatch(Action::AddToWishlist(product.id.clone()));
        Notice::info(
            "Added to Wishlist",
            format!("{} added to your wishlist.", product.name),
        )
    }
}

/// Resolve a product image path to an absolute URL.
///
/// Absolute `http(s)` URLs pass through. Anything else loses its leading
/// slashes and one leading `static/` segment and is served from
/// `static_base`.
#[must_use]
pub fn resolve_image_url(static_base: &Url, image: &str) -> String {
    if image.starts_with("http") {
        return image.to_owned();
    }
    let path = image.trim_start_matches('/');
    let path = path.strip_prefix("static/").unwrap_or(path);
    format!("{static_base}{path}")
}

/// What a product card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub image_url: String,
    /// Price actually charged, formatted.
    pub price: String,
    /// Struck-through list price, when discounted.
    pub original_price: Option<String>,
    pub badges: Vec<String>,
    /// `4.5 (18)`
    pub rating: Option<String>,
    pub wishlisted: bool,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, static_base: Option<&Url>, state: &StoreState) -> Self {
        let image_url = match (product.primary_image(), static_base) {
            (Some(image), Some(base)) => resolve_image_url(base, image),
            (Some(image), None) => image.to_owned(),
            (None, _) => PLACEHOLDER_IMAGE.to_owned(),
        };

        let mut badges = Vec::new();
        if product.new_arrival {
            badges.push("New".to_string());
        }
        if product.best_seller {
            badges.push("Bestseller".to_string());
        }
        if let Some(percent) = product.discount_percent() {
            badges.push(format!("{percent}% Off"));
        }

        let original_price = product
            .discount_price
            .and(product.price)
            .filter(|list| *list > Price::from_rupees(0))
            .map(|list| list.display());
        let price = format_price(product.effective_price());

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            image_url,
            price,
            original_price,
            badges,
            rating: product
                .rating
                .map(|r| format!("{r} ({})", product.review_count)),
            wishlisted: state.is_in_wishlist(&product.id),
        }
    }
}
