//! Product and category listing endpoints.

use jokroup_core::{Category, Filters, Product, Subcategory, products_from_payload};
use tracing::{debug, instrument};

use super::{ApiClient, ApiError, paths};

impl ApiClient {
    /// Fetch the product listing matching `filters`.
    ///
    /// Empty facets are left out of the query; the price range is always
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or a product fails to decode.
    #[instrument(skip(self, filters))]
    pub async fn list_products(&self, filters: &Filters) -> Result<Vec<Product>, ApiError> {
        let payload = self
            .get_json(paths::PRODUCT_LIST, &filters.to_query_pairs())
            .await?;
        let products = products_from_payload(payload)?;
        debug!(count = products.len(), "Fetched filtered products");
        Ok(products)
    }

    /// Fetch the unfiltered product listing.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or a product fails to decode.
    #[instrument(skip(self))]
    pub async fn list_all_products(&self) -> Result<Vec<Product>, ApiError> {
        let payload = self.get_json(paths::PRODUCT_LIST, &[]).await?;
        Ok(products_from_payload(payload)?)
    }

    /// Fetch the new-arrivals collection.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or a product fails to decode.
    #[instrument(skip(self))]
    pub async fn new_arrivals(&self) -> Result<Vec<Product>, ApiError> {
        let payload = self.get_json(paths::NEW_ARRIVALS, &[]).await?;
        Ok(products_from_payload(payload)?)
    }

    /// Fetch the best-seller collection.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or a product fails to decode.
    #[instrument(skip(self))]
    pub async fn best_sellers(&self) -> Result<Vec<Product>, ApiError> {
        let payload = self
            .get_json(paths::PRODUCT_LIST, &[("bestSeller", "true".to_string())])
            .await?;
        Ok(products_from_payload(payload)?)
    }

    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a list.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let payload = self.get_json(paths::CATEGORY_LIST, &[]).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch all subcategories.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a list.
    #[instrument(skip(self))]
    pub async fn subcategories(&self) -> Result<Vec<Subcategory>, ApiError> {
        let payload = self.get_json(paths::SUBCATEGORY_LIST, &[]).await?;
        Ok(serde_json::from_value(payload)?)
    }
}
