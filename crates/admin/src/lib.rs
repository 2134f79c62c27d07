//! Jokroup admin console library.
//!
//! Admin tables for users, products and coupons with client-side search,
//! pagination and row deletion, plus the dashboard summary. Built on the
//! storefront client's [`AppState`](jokroup_storefront::AppState).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod error;
pub mod pages;
pub mod table;

pub use error::{AdminError, Result};
pub use pages::dashboard::{Dashboard, DashboardMetrics, load_dashboard};
pub use pages::{AdminPage, AdminResource};
pub use table::{AdminTable, PAGE_SIZE, Searchable, TableView};
