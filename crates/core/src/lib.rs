//! ReThread Core - Shared domain types.
//!
//! This crate provides the types shared by every ReThread component:
//! - `storefront` - Catalog, cart ledger, session, checkout and dashboards
//! - `cli` - Command-line front end driving the storefront engine
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, quantities, emails and enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
