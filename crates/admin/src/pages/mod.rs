//! Admin pages.
//!
//! Every table page follows the same pattern: fetch the whole collection
//! once, search and paginate it locally, and delete rows through the
//! backend without re-fetching. [`AdminResource`] describes one collection;
//! [`AdminPage`] drives the pattern for any of them.

pub mod coupons;
pub mod dashboard;
pub mod products;
pub mod users;

use std::future::Future;

use jokroup_storefront::api::{ApiClient, ApiError};
use jokroup_storefront::store::Action;
use jokroup_storefront::{AppState, Notice};
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument};

use crate::components::DataTableConfig;
use crate::error::{AdminError, Result};
use crate::table::{AdminTable, Searchable, TableView};

/// Description shared by the not-yet-built row actions.
pub const NOT_IMPLEMENTED: &str = "This feature is not implemented in the demo.";

/// A collection managed from the admin console.
pub trait AdminResource: Searchable + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Plural lowercase noun: `users`.
    const NOUN: &'static str;
    /// Singular capitalized noun: `User`.
    const SINGULAR: &'static str;

    /// Fetch the raw collection.
    fn fetch(api: &ApiClient) -> impl Future<Output = std::result::Result<serde_json::Value, ApiError>> + Send;

    /// Delete one row by ID.
    fn delete(api: &ApiClient, id: &str) -> impl Future<Output = std::result::Result<(), ApiError>> + Send;

    /// Store action that publishes a freshly loaded collection, if the
    /// store keeps one.
    fn store_action(_rows: &[Self]) -> Option<Action> {
        None
    }

    /// Store action that drops a deleted row from the store's copy.
    fn removal_action(_id: &str) -> Option<Action> {
        None
    }

    /// Table cells for this row, in column order.
    fn cells(&self, state: &AppState) -> Vec<String>;

    fn table_config() -> DataTableConfig;
}

/// Decode a collection response. Anything other than a JSON array is
/// rejected.
///
/// # Errors
///
/// Returns [`AdminError::InvalidResponse`] for a non-array payload and
/// [`AdminError::Decode`] when an element is malformed.
pub fn decode_collection<T: DeserializeOwned>(payload: serde_json::Value) -> Result<Vec<T>> {
    if !payload.is_array() {
        return Err(AdminError::InvalidResponse);
    }
    Ok(serde_json::from_value(payload)?)
}

/// Fetch and decode a resource's collection.
///
/// # Errors
///
/// Returns error if the request fails or the payload is not a valid array.
pub async fn load_rows<T: AdminResource>(api: &ApiClient) -> Result<Vec<T>> {
    let payload = T::fetch(api).await?;
    decode_collection(payload)
}

/// A table page for one resource.
#[derive(Debug)]
pub struct AdminPage<T> {
    state: AppState,
    view: TableView<T>,
}

impl<T: AdminResource> AdminPage<T> {
    /// Fetch the collection and build the page. A failed fetch yields a
    /// page in the error state rather than an error.
    #[instrument(skip(state), fields(resource = T::NOUN))]
    pub async fn load(state: &AppState) -> Self {
        let view = match load_rows::<T>(state.api()).await {
            Ok(rows) => {
                info!(count = rows.len(), "Loaded admin collection");
                if let Some(action) = T::store_action(&rows) {
                    state.store().dispatch(action);
                }
                TableView::Ready(AdminTable::new(rows))
            }
            Err(e) => {
                error!(error = %e, "Error fetching {}", T::NOUN);
                e.report();
                TableView::Failed {
                    message: format!("Failed to load {}. Please try again later.", T::NOUN),
                }
            }
        };
        Self {
            state: state.clone(),
            view,
        }
    }

    /// Build a page over rows that are already loaded.
    #[must_use]
    pub fn from_rows(state: &AppState, rows: Vec<T>) -> Self {
        Self {
            state: state.clone(),
            view: TableView::Ready(AdminTable::new(rows)),
        }
    }

    #[must_use]
    pub const fn view(&self) -> &TableView<T> {
        &self.view
    }

    #[must_use]
    pub const fn table(&self) -> Option<&AdminTable<T>> {
        self.view.table()
    }

    pub const fn table_mut(&mut self) -> Option<&mut AdminTable<T>> {
        self.view.table_mut()
    }

    /// Delete a row through the backend, then drop it from the table and
    /// from the store.
    ///
    /// The rows are untouched when the backend call fails.
    #[instrument(skip(self), fields(resource = T::NOUN))]
    pub async fn delete(&mut self, id: &str) -> Notice {
        let singular = T::SINGULAR;
        let lower = singular.to_lowercase();
        match T::delete(self.state.api(), id).await {
            Ok(()) => {
                if let Some(table) = self.view.table_mut() {
                    table.remove_row(id);
                }
                if let Some(action) = T::removal_action(id) {
                    self.state.store().dispatch(action);
                }
                Notice::info("Success", format!("{singular} deleted successfully"))
            }
            Err(e) => {
                error!(error = %e, "Error deleting {lower}");
                Notice::error("Error", format!("Failed to delete {lower}"))
            }
        }
    }

    /// Row action placeholder for editing.
    #[must_use]
    pub fn edit(&self, id: &str) -> Notice {
        Notice::info(
            format!("Edit {}", T::SINGULAR),
            format!("Editing {} {id}. {NOT_IMPLEMENTED}", T::SINGULAR.to_lowercase()),
        )
    }

    /// Header action placeholder for creating a row.
    #[must_use]
    pub fn add(&self) -> Notice {
        Notice::info(format!("Add {}", T::SINGULAR), NOT_IMPLEMENTED)
    }

    /// Render the current page as text, including the summary and
    /// pagination footer, the empty state, or the load error.
    #[must_use]
    pub fn render(&self) -> String {
        let table = match &self.view {
            TableView::Ready(table) => table,
            TableView::Failed { message } => return message.clone(),
        };
        let config = T::table_config();
        let rows: Vec<Vec<String>> = table
            .page_rows()
            .into_iter()
            .map(|row| row.cells(&self.state))
            .collect();
        let mut out = config.render(&rows);
        match table.summary(T::NOUN) {
            Some(summary) => {
                out.push_str("\n\n");
                out.push_str(&summary);
                out.push_str("  |  ");
                out.push_str(&table.page_label());
            }
            None => {
                out.push_str("\n\n");
                out.push_str(&config.empty_title);
                if let Some(description) = &config.empty_description {
                    out.push('\n');
                    out.push_str(description);
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jokroup_core::Coupon;

    #[test]
    fn test_decode_collection_rejects_objects() {
        let err = decode_collection::<Coupon>(serde_json::json!({"coupons": []})).unwrap_err();
        assert!(matches!(err, AdminError::InvalidResponse));
        assert_eq!(err.to_string(), "Invalid API response format");
    }

    #[test]
    fn test_decode_collection_reads_arrays() {
        let coupons: Vec<Coupon> = decode_collection(serde_json::json!([
            {"id": 1, "code": "WELCOME10", "discount": 10, "active": true}
        ]))
        .unwrap();
        assert_eq!(coupons[0].code, "WELCOME10");
    }

    #[test]
    fn test_decode_collection_reports_bad_elements() {
        let err = decode_collection::<Coupon>(serde_json::json!([{"code": 5}])).unwrap_err();
        assert!(matches!(err, AdminError::Decode(_)));
    }
}
