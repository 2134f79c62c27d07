//! Jokroup storefront client library.
//!
//! Client-side state and REST access for the Jokroup store: the shared
//! [`store::Store`], the filter panel, the product listing, authentication
//! with demo accounts, account settings and session persistence.
//!
//! # Example
//!
//! ```rust,ignore
//! use jokroup_storefront::{config::StorefrontConfig, state::AppState};
//! use jokroup_storefront::filter_panel::FilterPanel;
//!
//! let state = AppState::new(StorefrontConfig::from_env()?)?;
//! let mut panel = FilterPanel::new(&state);
//! panel.toggle_color("red");
//! panel.apply().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod filter_panel;
pub mod listing;
pub mod notice;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

pub use error::{AppError, Result};
pub use notice::{Notice, NoticeVariant};
pub use state::AppState;
