//! Core types for the Jokroup storefront client.
//!
//! This module provides type-safe wrappers and plain data types for the
//! domain concepts shared by the storefront, the admin console and the CLI.

pub mod commerce;
pub mod email;
pub mod filters;
pub mod id;
pub mod price;
pub mod product;
pub mod role;
pub mod user;

pub use commerce::{CartItem, Coupon, WishlistItem};
pub use email::{Email, EmailError};
pub use filters::{ALL_COLORS, ALL_SIZES, FilterFacet, Filters, PriceRange};
pub use id::*;
pub use price::{Price, format_price};
pub use product::{Category, Product, Subcategory, category_tree, products_from_payload};
pub use role::Role;
pub use user::{Address, SessionToken, User};
