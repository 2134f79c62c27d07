//! Coupons admin page.

use chrono::Utc;
use jokroup_core::{Coupon, CouponId};
use jokroup_storefront::AppState;
use jokroup_storefront::api::{ApiClient, ApiError};
use jokroup_storefront::store::Action;

use super::AdminResource;
use crate::components::DataTableConfig;
use crate::components::data_table::coupons_table_config;
use crate::table::{Searchable, contains_ignore_case};

impl Searchable for Coupon {
    fn row_id(&self) -> &str {
        self.id.as_str()
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.code, needle)
    }
}

impl AdminResource for Coupon {
    const NOUN: &'static str = "coupons";
    const SINGULAR: &'static str = "Coupon";

    async fn fetch(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
        api.list_coupons().await
    }

    async fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete_coupon(&CouponId::new(id)).await
    }

    fn store_action(rows: &[Self]) -> Option<Action> {
        Some(Action::SetCoupons(rows.to_vec()))
    }

    fn removal_action(id: &str) -> Option<Action> {
        Some(Action::RemoveCoupon(CouponId::new(id)))
    }

    fn cells(&self, _state: &AppState) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.code.clone(),
            format!("{}%", self.discount.normalize()),
            coupon_status(self).to_string(),
            self.expires_at
                .map_or_else(|| "Never".to_string(), |d| d.format("%b %-d, %Y").to_string()),
        ]
    }

    fn table_config() -> DataTableConfig {
        coupons_table_config()
    }
}

/// `Active`, `Inactive` or `Expired`.
#[must_use]
pub fn coupon_status(coupon: &Coupon) -> &'static str {
    if coupon.expires_at.is_some_and(|d| d < Utc::now()) {
        "Expired"
    } else if coupon.active {
        "Active"
    } else {
        "Inactive"
    }
}
