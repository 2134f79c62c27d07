//! Products admin page.

use jokroup_core::{Product, ProductId, format_price};
use jokroup_storefront::store::Action;
use jokroup_storefront::AppState;
use jokroup_storefront::api::{ApiClient, ApiError};

use super::AdminResource;
use crate::components::DataTableConfig;
use crate::components::data_table::products_table_config;
use crate::table::{Searchable, contains_ignore_case};

impl Searchable for Product {
    fn row_id(&self) -> &str {
        self.id.as_str()
    }

    fn matches(&self, needle: &str) -> bool {
        contains_ignore_case(&self.name, needle)
            || self
                .category
                .as_deref()
                .is_some_and(|c| contains_ignore_case(c, needle))
            || contains_ignore_case(self.id.as_str(), needle)
    }
}

impl AdminResource for Product {
    const NOUN: &'static str = "products";
    const SINGULAR: &'static str = "Product";

    async fn fetch(api: &ApiClient) -> Result<serde_json::Value, ApiError> {
        api.list_admin_products().await
    }

    async fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete_product(&ProductId::new(id)).await
    }

    // The storefront listing owns `products`; the admin table does not
    // overwrite it, but a deleted product leaves every cached listing.
    fn removal_action(id: &str) -> Option<Action> {
        Some(Action::RemoveProduct(ProductId::new(id)))
    }

    fn cells(&self, _state: &AppState) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category.clone().unwrap_or_else(|| "-".to_string()),
            format_price(self.effective_price()),
            stock_label(self).to_string(),
        ]
    }

    fn table_config() -> DataTableConfig {
        products_table_config()
    }
}

const fn stock_label(product: &Product) -> &'static str {
    if product.in_stock { "In stock" } else { "Out of stock" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::table::AdminTable;

    fn product(id: u32, name: &str, category: Option<&str>) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "price": 999,
            "category": category,
        }))
        .unwrap()
    }

    #[test]
    fn test_search_by_name_category_or_id() {
        let mut table = AdminTable::new(vec![
            product(101, "Silk Kurta", Some("men")),
            product(202, "Cotton Saree", Some("women")),
            product(303, "Gift Card", None),
        ]);

        table.set_search("kurta");
        assert_eq!(table.filtered_len(), 1);

        table.set_search("WOMEN");
        assert_eq!(table.page_rows()[0].name, "Cotton Saree");

        table.set_search("men");
        assert_eq!(table.filtered_len(), 2);

        table.set_search("303");
        assert_eq!(table.page_rows()[0].name, "Gift Card");
    }

    #[test]
    fn test_stock_label() {
        let mut p = product(1, "Scarf", None);
        assert_eq!(stock_label(&p), "In stock");
        p.in_stock = false;
        assert_eq!(stock_label(&p), "Out of stock");
    }
}
