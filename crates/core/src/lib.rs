//! Jokroup Core - Shared types library.
//!
//! This crate provides common types used across all Jokroup components:
//! - `storefront` - Client-side state and REST access for the shop
//! - `admin` - Admin console tables and dashboard
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - IDs, emails, prices, users, products, filters and coupons

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
