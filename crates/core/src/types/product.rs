//! Catalog types: products, categories and subcategories.
//!
//! Products are read-only on the client. They are only ever replaced by a
//! fresh fetch, never edited in place.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, SubcategoryId};
use super::price::Price;

/// A product as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// List price. Some catalog rows carry `null`; they still list, priced
    /// as `N/A`.
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default, alias = "discount_price")]
    pub discount_price: Option<Price>,
    /// Image paths or absolute URLs, in display order.
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default, alias = "new_arrival", alias = "isNew")]
    pub new_arrival: bool,
    #[serde(default, alias = "best_seller")]
    pub best_seller: bool,
    #[serde(default = "default_in_stock", alias = "in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, alias = "review_count", alias = "reviews")]
    pub review_count: u32,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// The price a shopper pays: the discount price when present.
    #[must_use]
    pub fn effective_price(&self) -> Option<Price> {
        self.discount_price.or(self.price)
    }

    /// Whether a discount price below the list price is set.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        matches!((self.discount_price, self.price), (Some(d), Some(p)) if d < p)
    }

    /// Whole-percent saving shown on the discount badge, when a discount
    /// price is set and the list price is positive.
    #[must_use]
    pub fn discount_percent(&self) -> Option<i64> {
        let discount = self.discount_price?.amount();
        let price = self.price?.amount();
        if price <= Decimal::ZERO {
            return None;
        }
        ((price - discount) / price * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }

    /// The first image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Accept `images` as a JSON array, as a string containing a JSON-encoded
/// array, or as `null`. Strings that do not parse as an array yield no images.
fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Images {
        List(Vec<String>),
        Encoded(String),
    }

    match Option::<Images>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Images::List(list)) => Ok(list),
        Some(Images::Encoded(raw)) => Ok(serde_json::from_str::<Vec<String>>(&raw)
            .unwrap_or_default()),
    }
}

/// Listing responses come either as a bare array or wrapped in a `products`
/// field. Any other shape is treated as an empty listing.
///
/// # Errors
///
/// Returns an error if an element of the listing is not a valid product.
pub fn products_from_payload(payload: serde_json::Value) -> Result<Vec<Product>, serde_json::Error> {
    match payload {
        serde_json::Value::Array(_) => serde_json::from_value(payload),
        serde_json::Value::Object(mut map) => match map.remove("products") {
            Some(list @ serde_json::Value::Array(_)) => serde_json::from_value(list),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

/// A top-level product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// A subcategory nested under a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    pub slug: String,
    pub category_id: CategoryId,
}

/// Categories paired with their subcategories, in category order.
#[must_use]
pub fn category_tree<'a>(
    categories: &'a [Category],
    subcategories: &'a [Subcategory],
) -> Vec<(&'a Category, Vec<&'a Subcategory>)> {
    categories
        .iter()
        .map(|cat| {
            let children = subcategories
                .iter()
                .filter(|sub| sub.category_id == cat.id)
                .collect();
            (cat, children)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::price::format_price;

    fn product_json() -> serde_json::Value {
        json!({
            "id": 3,
            "name": "Linen Kurta",
            "price": 1499,
            "discountPrice": "1199.00",
            "images": ["/static/kurta-1.jpg", "kurta-2.jpg"],
            "category": "men",
            "in_stock": false,
            "bestSeller": true,
            "rating": 4.5,
            "reviewCount": 18
        })
    }

    #[test]
    fn test_deserialize_mixed_field_styles() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.id.as_str(), "3");
        assert_eq!(product.price, Some(Price::from_rupees(1499)));
        assert_eq!(
            product.discount_price,
            Some(Price::new(Decimal::new(119_900, 2)))
        );
        assert!(!product.in_stock);
        assert!(product.best_seller);
        assert!(!product.new_arrival);
        assert_eq!(product.review_count, 18);
        assert_eq!(product.primary_image(), Some("/static/kurta-1.jpg"));
    }

    #[test]
    fn test_images_encoded_as_string() {
        let mut value = product_json();
        value["images"] = json!("[\"a.jpg\",\"b.jpg\"]");
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_images_unparseable_string_is_empty() {
        let mut value = product_json();
        value["images"] = json!("not json");
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.images.is_empty());

        let mut value = product_json();
        value["images"] = serde_json::Value::Null;
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.primary_image().is_none());
    }

    #[test]
    fn test_effective_price() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert!(product.is_discounted());
        assert_eq!(format_price(product.effective_price()), "₹1,199");
    }

    #[test]
    fn test_null_price_still_decodes() {
        let mut value = product_json();
        value["price"] = serde_json::Value::Null;
        value["discountPrice"] = serde_json::Value::Null;
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.price, None);
        assert!(!product.is_discounted());
        assert_eq!(product.discount_percent(), None);
        assert_eq!(format_price(product.effective_price()), "N/A");

        // A discount without a list price is still what the shopper pays
        let mut value = product_json();
        value.as_object_mut().unwrap().remove("price");
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(format_price(product.effective_price()), "₹1,199");
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_discount_percent() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        // (1499 - 1199) / 1499 = 20.01%
        assert_eq!(product.discount_percent(), Some(20));

        let mut value = product_json();
        value["discountPrice"] = serde_json::Value::Null;
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_products_from_payload_shapes() {
        let bare = json!([product_json()]);
        assert_eq!(products_from_payload(bare).unwrap().len(), 1);

        let wrapped = json!({ "products": [product_json(), product_json()] });
        assert_eq!(products_from_payload(wrapped).unwrap().len(), 2);

        assert!(products_from_payload(json!({ "items": [] })).unwrap().is_empty());
        assert!(products_from_payload(json!({ "products": "none" })).unwrap().is_empty());
        assert!(products_from_payload(json!("oops")).unwrap().is_empty());
    }

    #[test]
    fn test_category_tree() {
        let categories = vec![
            Category { id: CategoryId::new("1"), name: "Men".into(), slug: "men".into() },
            Category { id: CategoryId::new("2"), name: "Kids".into(), slug: "kids".into() },
        ];
        let subcategories = vec![
            Subcategory {
                id: SubcategoryId::new("10"),
                name: "Shirts".into(),
                slug: "shirts".into(),
                category_id: CategoryId::new("1"),
            },
            Subcategory {
                id: SubcategoryId::new("11"),
                name: "Jeans".into(),
                slug: "jeans".into(),
                category_id: CategoryId::new("1"),
            },
        ];

        let tree = category_tree(&categories, &subcategories);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].1.len(), 2);
        assert!(tree[1].1.is_empty());
    }
}
