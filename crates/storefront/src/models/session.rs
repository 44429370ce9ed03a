//! Session-related constants.

/// Keys under which records are persisted in the [`crate::store::KeyValueStore`].
pub mod keys {
    /// Key for the cart line items (JSON array of [`crate::models::CartLine`]).
    pub const CART: &str = "cart";

    /// Key for the signed-in user (JSON object, see [`crate::models::User`]).
    pub const USER: &str = "user";
}
