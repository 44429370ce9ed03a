//! Domain models for the storefront.
//!
//! - [`product`] - Catalog product record
//! - [`cart`] - Persisted cart line and derived totals
//! - [`user`] - Session user record
//! - [`session`] - Store keys for persisted records

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CartLine, CartTotals};
pub use product::Product;
pub use user::User;
