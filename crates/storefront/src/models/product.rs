//! Catalog product record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use rethread_core::{Category, Condition, ProductId};

/// Image shown when a product has no pictures.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A second-hand item for sale.
///
/// Products are supplied by the compiled-in catalog and never change during a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Asking price, never negative.
    pub price: Decimal,
    /// Retail price when new, if the seller supplied one.
    pub original_price: Option<Decimal>,
    pub brand: String,
    pub size: String,
    pub color: String,
    pub condition: Condition,
    pub created_at: DateTime<Utc>,
    /// Relative popularity score; higher sorts first.
    pub popularity: u32,
    /// Ordered image references; the first is the cover image.
    pub images: Vec<String>,
    /// Seller display name.
    pub seller: String,
    /// Shown in the home page carousel.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Cover image, falling back to [`PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images.first().map_or(PLACEHOLDER_IMAGE, String::as_str)
    }

    /// Whole-percent saving against the original price.
    ///
    /// `None` when there is no original price or it is not above the asking
    /// price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price.filter(|o| *o > self.price)?;
        let saved = (original - self.price) / original * Decimal::ONE_HUNDRED;
        saved.round().to_u32()
    }
}
