//! Read-only product catalog and query engine.
//!
//! The catalog is compiled in (see [`seed`]) and never persisted. Lookups by
//! identifier return [`CatalogError::NotFound`] on a miss; filtering, search
//! and sorting live in [`query`].

pub mod options;
pub mod query;
mod seed;

use thiserror::Error;

use rethread_core::ProductId;

use crate::models::Product;

pub use query::{FilterSpec, PriceRange, SortKey};

/// Catalog lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No product has the requested identifier.
    #[error("product not found: {0}")]
    NotFound(String),
}

/// An immutable, ordered product collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap an existing product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The compiled-in sample catalog.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(seed::products())
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by identifier.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has `id`.
    pub fn find(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Look up a product by a raw identifier such as a URL segment.
    ///
    /// Non-numeric input is a miss, not a parse error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if `raw` names no product.
    pub fn find_str(&self, raw: &str) -> Result<&Product, CatalogError> {
        raw.parse::<ProductId>()
            .map_err(|_| CatalogError::NotFound(raw.to_owned()))
            .and_then(|id| self.find(id))
    }

    /// The first `limit` products flagged as featured.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).take(limit).collect()
    }

    /// Run a filter/search/sort over the whole catalog.
    #[must_use]
    pub fn query(&self, spec: &FilterSpec) -> Vec<&Product> {
        query::query(&self.products, spec)
    }
}
