//! Admin collection endpoints: users, products and coupons.
//!
//! Listing calls return the raw JSON so the admin tables can tell a
//! malformed response apart from a failed request.

use jokroup_core::{CouponId, ProductId, UserId};
use tracing::instrument;

use super::{ApiClient, ApiError, paths};

impl ApiClient {
    /// Fetch every user account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json(paths::USERS, &[]).await
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.delete_item(paths::USER_ITEMS, id.as_str()).await
    }

    /// Fetch the full product catalog for the admin table.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_admin_products(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json(paths::PRODUCT_LIST, &[]).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.delete_item(paths::PRODUCT_ITEMS, id.as_str()).await
    }

    /// Fetch every coupon.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_coupons(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json(paths::COUPON_LIST, &[]).await
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(coupon_id = %id))]
    pub async fn delete_coupon(&self, id: &CouponId) -> Result<(), ApiError> {
        self.delete_item(paths::COUPON_ITEMS, id.as_str()).await
    }
}
