//! Wishlist, cart and coupon types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CouponId, ProductId};

/// A wishlisted product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
}

/// A line in the shopping cart.
///
/// Lines are keyed by product, size and color: adding the same combination
/// again increases the quantity instead of adding a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CartItem {
    /// Whether two lines refer to the same product variant.
    #[must_use]
    pub fn same_variant(&self, other: &Self) -> bool {
        self.product_id == other.product_id && self.size == other.size && self.color == other.color
    }
}

/// A discount coupon managed from the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    /// Discount percentage.
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub active: bool,
    #[serde(default, alias = "expires_at")]
    pub expires_at: Option<DateTime<Utc>>,
}
