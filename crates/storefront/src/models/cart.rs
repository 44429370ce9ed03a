//! Persisted cart line items and derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rethread_core::ProductId;

use super::Product;

/// One row in the cart.
///
/// Serialized with the field names the storefront has always persisted
/// (`id`, `price`, ...), so carts written by older builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to; unique within a cart.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    /// Price per unit, captured when the line was first added.
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    /// Always at least 1.
    pub quantity: u32,
    pub seller: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl CartLine {
    /// Snapshot `product` into a new line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            seller: product.seller.clone(),
            image: product.images.first().cloned(),
        }
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Subtotal, tax and grand total for a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Derive totals for `lines` at `tax_rate` (e.g. `0.05` for 5%).
    #[must_use]
    pub fn compute(lines: &[CartLine], tax_rate: Decimal) -> Self {
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
