//! Reusable admin UI component descriptions.

pub mod data_table;

pub use data_table::{DataTableConfig, TableColumn};
