//! ReThread storefront library.
//!
//! Catalog queries, the persisted cart ledger, simulated sign-in, checkout,
//! seller listings and the moderation dashboards. The `rethread` CLI is a thin
//! layer over this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod providers;
pub mod services;
pub mod state;
pub mod store;

pub use error::{AppError, Result};
pub use state::{Providers, Storefront};
