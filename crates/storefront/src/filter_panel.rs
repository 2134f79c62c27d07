//! Filter panel.
//!
//! The panel edits a draft copy of the store's filters. Nothing reaches the
//! store until [`FilterPanel::apply`] succeeds, which commits the fetched
//! products and the draft in one go. When the store's filters change from
//! elsewhere, [`FilterPanel::sync_from_store`] replaces the draft.

use jokroup_core::{
    ALL_COLORS, ALL_SIZES, Category, FilterFacet, Filters, PriceRange, Subcategory, category_tree,
};
use tokio::sync::watch;
use tracing::{error, info, instrument};

use crate::api::ApiError;
use crate::error::add_breadcrumb;
use crate::state::AppState;
use crate::store::{Action, StoreState};

/// Draft filter state plus the category tree it is edited against.
pub struct FilterPanel {
    state: AppState,
    draft: Filters,
    /// Store filters the draft was last synchronized from.
    synced: Filters,
    updates: watch::Receiver<StoreState>,
    open: bool,
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
}

impl std::fmt::Debug for FilterPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPanel")
            .field("draft", &self.draft)
            .field("open", &self.open)
            .field("categories", &self.categories.len())
            .field("subcategories", &self.subcategories.len())
            .finish_non_exhaustive()
    }
}

impl FilterPanel {
    /// Create a panel whose draft starts from the store's current filters.
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        let mut updates = state.store().subscribe();
        let filters = updates.borrow_and_update().filters.clone();
        Self {
            state: state.clone(),
            draft: filters.clone(),
            synced: filters,
            updates,
            open: false,
            categories: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    // =========================================================================
    // Store Synchronization
    // =========================================================================

    /// Replace the draft if the store's filters changed since the last sync.
    ///
    /// Returns whether the draft was replaced. Unrelated store changes leave
    /// in-progress edits alone.
    pub fn sync_from_store(&mut self) -> bool {
        let filters = self.updates.borrow_and_update().filters.clone();
        if filters == self.synced {
            return false;
        }
        self.draft = filters.clone();
        self.synced = filters;
        true
    }

    // =========================================================================
    // Draft Editing
    // =========================================================================

    #[must_use]
    pub const fn draft(&self) -> &Filters {
        &self.draft
    }

    /// Flip `value` in `facet`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, facet: FilterFacet, value: &str) -> bool {
        self.draft.toggle(facet, value)
    }

    pub fn toggle_category(&mut self, slug: &str) -> bool {
        self.toggle(FilterFacet::Category, slug)
    }

    pub fn toggle_subcategory(&mut self, slug: &str) -> bool {
        self.toggle(FilterFacet::Subcategory, slug)
    }

    pub fn toggle_color(&mut self, color: &str) -> bool {
        self.toggle(FilterFacet::Color, color)
    }

    pub fn toggle_size(&mut self, size: &str) -> bool {
        self.toggle(FilterFacet::Size, size)
    }

    /// Replace the price range with the two slider positions.
    pub fn set_price_range(&mut self, a: u32, b: u32) {
        self.draft.price_range = PriceRange::new(a, b);
    }

    // =========================================================================
    // Open / Close (mobile overlay)
    // =========================================================================

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Fetch products matching the draft and commit them with the draft.
    ///
    /// On success the panel closes and the number of matching products is
    /// returned. On failure the error is logged, the draft is kept and the
    /// panel stays open so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns the request error; the store is left untouched.
    #[instrument(skip(self), fields(filters = ?self.draft))]
    pub async fn apply(&mut self) -> Result<usize, ApiError> {
        let products = match self.state.api().list_products(&self.draft).await {
            Ok(products) => products,
            Err(e) => {
                error!(error = %e, "Failed to fetch filtered products");
                return Err(e);
            }
        };

        let count = products.len();
        self.state.store().dispatch(Action::ApplyFilters {
            filters: self.draft.clone(),
            products,
        });
        self.synced = self.draft.clone();
        self.close();

        add_breadcrumb("filters", "Applied filters", None);
        info!(count, "Applied filters");
        Ok(count)
    }

    /// Clear the draft, reset the store's filters and reload the unfiltered
    /// listing.
    ///
    /// The reset itself always happens; only the reload can fail.
    ///
    /// # Errors
    ///
    /// Returns the error from reloading the listing.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) -> Result<usize, ApiError> {
        self.draft = Filters::default();
        self.synced = Filters::default();
        self.state.store().dispatch(Action::ResetFilters);
        self.close();
        add_breadcrumb("filters", "Reset filters", None);

        match self.state.api().list_all_products().await {
            Ok(products) => {
                let count = products.len();
                self.state.store().dispatch(Action::SetProducts(products));
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Failed to reload products after reset");
                Err(e)
            }
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Load categories and subcategories concurrently.
    ///
    /// On failure the error is logged and the catalog is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the first request error.
    #[instrument(skip(self))]
    pub async fn load_catalog(&mut self) -> Result<(), ApiError> {
        let api = self.state.api();
        match tokio::try_join!(api.categories(), api.subcategories()) {
            Ok((categories, subcategories)) => {
                self.categories = categories;
                self.subcategories = subcategories;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error loading categories/subcategories");
                Err(e)
            }
        }
    }

    /// Categories with their subcategories, in category order.
    #[must_use]
    pub fn catalog(&self) -> Vec<(&Category, Vec<&Subcategory>)> {
        category_tree(&self.categories, &self.subcategories)
    }

    /// Colors offered by the panel.
    #[must_use]
    pub const fn colors() -> &'static [&'static str] {
        ALL_COLORS
    }

    /// Sizes offered by the panel.
    #[must_use]
    pub const fn sizes() -> &'static [&'static str] {
        ALL_SIZES
    }
}
