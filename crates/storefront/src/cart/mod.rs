//! Cart ledger.
//!
//! The persisted `cart` record is the single source of truth. Every operation
//! reloads it, applies one change, and writes it back while holding the
//! ledger's lock, so two threads sharing a ledger cannot interleave their
//! read-modify-write cycles.
//!
//! Invariants maintained on every write:
//! - at most one line per product
//! - every quantity is at least 1
//!
//! Invalid quantities are not errors: the operation reports
//! [`LineChange::Rejected`] and leaves the cart untouched.

use std::sync::Mutex;

use rust_decimal::Decimal;
use tracing::instrument;

use rethread_core::{ProductId, Quantity};

use crate::models::session::keys;
use crate::models::{CartLine, CartTotals, Product};
use crate::store::{KeyValueStore, StoreError, load_json, save_json};

/// Default sales tax applied to the subtotal (5%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// What a ledger operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was appended.
    Added,
    /// An existing line's quantity grew; carries the new quantity.
    Incremented(u32),
    /// An existing line's quantity was replaced.
    Updated,
    /// A line was deleted.
    Removed,
    /// The whole cart was emptied.
    Cleared,
    /// The quantity was not a positive integer; nothing changed.
    Rejected,
    /// No line matched; nothing changed.
    Unchanged,
}

impl LineChange {
    /// Whether the operation modified the stored cart.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        !matches!(self, Self::Rejected | Self::Unchanged)
    }
}

/// Cart operations over a [`KeyValueStore`].
pub struct CartLedger<S> {
    store: S,
    tax_rate: Decimal,
    lock: Mutex<()>,
}

impl<S: KeyValueStore> CartLedger<S> {
    /// Create a ledger with the default 5% tax rate.
    pub const fn new(store: S) -> Self {
        Self::with_tax_rate(store, DEFAULT_TAX_RATE)
    }

    /// Create a ledger with a custom tax rate (fraction, e.g. `0.18`).
    pub const fn with_tax_rate(store: S, tax_rate: Decimal) -> Self {
        Self {
            store,
            tax_rate,
            lock: Mutex::new(()),
        }
    }

    /// The tax rate applied by [`Self::tax`].
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&self, product: &Product, quantity: i64) -> Result<LineChange, StoreError> {
        let Some(quantity) = Quantity::new(quantity) else {
            tracing::debug!(quantity, "Ignoring add with non-positive quantity");
            return Ok(LineChange::Rejected);
        };

        self.modify(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product_id == product.id) {
                line.quantity = line.quantity.saturating_add(quantity.get());
                LineChange::Incremented(line.quantity)
            } else {
                lines.push(CartLine::from_product(product, quantity.get()));
                LineChange::Added
            }
        })
    }

    /// Replace the quantity of the line for `id`.
    ///
    /// Non-positive quantities are rejected rather than treated as removal.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn set_quantity(&self, id: ProductId, quantity: i64) -> Result<LineChange, StoreError> {
        let Some(quantity) = Quantity::new(quantity) else {
            tracing::debug!("Ignoring quantity update below 1");
            return Ok(LineChange::Rejected);
        };

        self.modify(|lines| {
            lines
                .iter_mut()
                .find(|l| l.product_id == id)
                .map_or(LineChange::Unchanged, |line| {
                    line.quantity = quantity.get();
                    LineChange::Updated
                })
        })
    }

    /// [`Self::add_item`] for a quantity typed by a user.
    ///
    /// Text that is not a whole number of at least 1 is rejected like a
    /// non-positive number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn add_item_input(&self, product: &Product, input: &str) -> Result<LineChange, StoreError> {
        match Quantity::parse(input) {
            Some(quantity) => self.add_item(product, i64::from(quantity.get())),
            None => {
                tracing::debug!(input, "Ignoring add with unparseable quantity");
                Ok(LineChange::Rejected)
            }
        }
    }

    /// [`Self::set_quantity`] for a quantity typed by a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn set_quantity_input(&self, id: ProductId, input: &str) -> Result<LineChange, StoreError> {
        match Quantity::parse(input) {
            Some(quantity) => self.set_quantity(id, i64::from(quantity.get())),
            None => {
                tracing::debug!(input, "Ignoring quantity update with unparseable input");
                Ok(LineChange::Rejected)
            }
        }
    }

    /// Delete the line for `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn remove_item(&self, id: ProductId) -> Result<LineChange, StoreError> {
        self.modify(|lines| {
            let before = lines.len();
            lines.retain(|l| l.product_id != id);
            if lines.len() == before {
                LineChange::Unchanged
            } else {
                LineChange::Removed
            }
        })
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<LineChange, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.store.remove(keys::CART)?;
        tracing::info!("Cart cleared");
        Ok(LineChange::Cleared)
    }

    /// Remove and return every line in one locked step.
    ///
    /// Lines added by another caller either land before the snapshot or
    /// after the clear, never in between.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn take(&self) -> Result<Vec<CartLine>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let lines = self.load()?;
        self.store.remove(keys::CART)?;
        tracing::info!(lines = lines.len(), "Cart taken for order");
        Ok(lines)
    }

    /// Current lines, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn lines(&self) -> Result<Vec<CartLine>, StoreError> {
        self.load()
    }

    /// Number of distinct lines (the cart badge count).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn line_count(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    /// Sum of all quantities.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn item_count(&self) -> Result<u64, StoreError> {
        Ok(self.load()?.iter().map(|l| u64::from(l.quantity)).sum())
    }

    /// Whether the cart has no lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.load()?.is_empty())
    }

    /// Sum of `unit_price * quantity` over all lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn subtotal(&self) -> Result<Decimal, StoreError> {
        Ok(self.totals()?.subtotal)
    }

    /// `subtotal * tax_rate`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn tax(&self) -> Result<Decimal, StoreError> {
        Ok(self.totals()?.tax)
    }

    /// `subtotal + tax`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn total(&self) -> Result<Decimal, StoreError> {
        Ok(self.totals()?.total)
    }

    /// Subtotal, tax and total from a single read.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn totals(&self) -> Result<CartTotals, StoreError> {
        Ok(CartTotals::compute(&self.load()?, self.tax_rate))
    }

    fn modify(
        &self,
        apply: impl FnOnce(&mut Vec<CartLine>) -> LineChange,
    ) -> Result<LineChange, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut lines = self.load()?;
        let change = apply(&mut lines);
        if change.is_applied() {
            save_json(&self.store, keys::CART, &lines)?;
            tracing::debug!(?change, lines = lines.len(), "Cart updated");
        }
        Ok(change)
    }

    /// Read the stored lines, repairing anything that breaks the invariants.
    fn load(&self) -> Result<Vec<CartLine>, StoreError> {
        let stored: Vec<CartLine> = load_json(&self.store, keys::CART)?.unwrap_or_default();
        let stored_len = stored.len();

        let mut lines: Vec<CartLine> = Vec::with_capacity(stored_len);
        for line in stored {
            if line.quantity == 0 {
                continue;
            }
            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }

        if lines.len() != stored_len {
            tracing::warn!(
                stored = stored_len,
                kept = lines.len(),
                "Repaired stored cart with duplicate or empty lines"
            );
        }

        Ok(lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::product::fixtures::product;
    use crate::store::MemoryStore;

    fn ledger() -> CartLedger<MemoryStore> {
        CartLedger::new(MemoryStore::new())
    }

    #[test]
    fn test_add_new_then_increment() {
        let ledger = ledger();
        let jacket = product(1, "Jacket", 1200);

        assert_eq!(ledger.add_item(&jacket, 2).unwrap(), LineChange::Added);
        assert_eq!(
            ledger.add_item(&jacket, 3).unwrap(),
            LineChange::Incremented(5)
        );

        let lines = ledger.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
    }

    #[test]
    fn test_add_rejects_non_positive() {
        let ledger = ledger();
        let jacket = product(1, "Jacket", 1200);
        assert_eq!(ledger.add_item(&jacket, 0).unwrap(), LineChange::Rejected);
        assert_eq!(ledger.add_item(&jacket, -4).unwrap(), LineChange::Rejected);
        assert!(ledger.is_empty().unwrap());
        assert!(ledger.store().is_empty());
    }

    #[test]
    fn test_set_quantity_rejects_zero_and_negative() {
        let ledger = ledger();
        let jacket = product(1, "Jacket", 1200);
        ledger.add_item(&jacket, 2).unwrap();

        assert_eq!(
            ledger.set_quantity(jacket.id, 0).unwrap(),
            LineChange::Rejected
        );
        assert_eq!(
            ledger.set_quantity(jacket.id, -1).unwrap(),
            LineChange::Rejected
        );
        assert_eq!(ledger.lines().unwrap()[0].quantity, 2);

        assert_eq!(
            ledger.set_quantity(jacket.id, 7).unwrap(),
            LineChange::Updated
        );
        assert_eq!(ledger.lines().unwrap()[0].quantity, 7);
    }

    #[test]
    fn test_textual_quantity_is_rejected() {
        let ledger = ledger();
        let jacket = product(1, "Jacket", 1200);

        assert_eq!(
            ledger.add_item_input(&jacket, "two").unwrap(),
            LineChange::Rejected
        );
        assert!(ledger.store().is_empty());

        assert_eq!(
            ledger.add_item_input(&jacket, " 2 ").unwrap(),
            LineChange::Added
        );
        assert_eq!(
            ledger.set_quantity_input(jacket.id, "abc").unwrap(),
            LineChange::Rejected
        );
        assert_eq!(
            ledger.set_quantity_input(jacket.id, "1.5").unwrap(),
            LineChange::Rejected
        );
        assert_eq!(ledger.lines().unwrap()[0].quantity, 2);

        assert_eq!(
            ledger.set_quantity_input(jacket.id, "4").unwrap(),
            LineChange::Updated
        );
        assert_eq!(ledger.lines().unwrap()[0].quantity, 4);
    }

    #[test]
    fn test_take_returns_lines_and_empties_cart() {
        let ledger = ledger();
        ledger.add_item(&product(1, "Coat", 100), 2).unwrap();
        ledger.add_item(&product(2, "Belt", 50), 1).unwrap();

        let taken = ledger.take().unwrap();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].quantity, 2);
        assert!(ledger.is_empty().unwrap());
        assert!(ledger.store().is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id() {
        let ledger = ledger();
        assert_eq!(
            ledger.set_quantity(ProductId::new(42), 3).unwrap(),
            LineChange::Unchanged
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let ledger = ledger();
        ledger.add_item(&product(1, "Jacket", 1200), 1).unwrap();
        assert_eq!(
            ledger.remove_item(ProductId::new(9)).unwrap(),
            LineChange::Unchanged
        );
        assert_eq!(ledger.line_count().unwrap(), 1);

        assert_eq!(
            ledger.remove_item(ProductId::new(1)).unwrap(),
            LineChange::Removed
        );
        assert_eq!(ledger.line_count().unwrap(), 0);
    }

    #[test]
    fn test_totals_and_clear() {
        let ledger = ledger();
        ledger.add_item(&product(1, "Coat", 100), 2).unwrap();
        ledger.add_item(&product(2, "Belt", 50), 1).unwrap();

        assert_eq!(ledger.subtotal().unwrap(), Decimal::from(250));
        assert_eq!(ledger.tax().unwrap(), Decimal::new(125, 1));
        assert_eq!(ledger.total().unwrap(), Decimal::new(2625, 1));
        assert_eq!(ledger.item_count().unwrap(), 3);

        assert_eq!(ledger.clear().unwrap(), LineChange::Cleared);
        assert_eq!(ledger.subtotal().unwrap(), Decimal::ZERO);
        assert_eq!(ledger.total().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_unit_price_is_snapshot() {
        let ledger = ledger();
        let mut coat = product(1, "Coat", 100);
        ledger.add_item(&coat, 1).unwrap();

        coat.price = Decimal::from(999);
        ledger.add_item(&coat, 1).unwrap();

        assert_eq!(ledger.lines().unwrap()[0].unit_price, Decimal::from(100));
    }

    #[test]
    fn test_malformed_cart_loads_empty() {
        let ledger = ledger();
        ledger.store().set(keys::CART, "[{\"oops\":").unwrap();
        assert!(ledger.is_empty().unwrap());

        ledger.add_item(&product(1, "Coat", 100), 1).unwrap();
        assert_eq!(ledger.line_count().unwrap(), 1);
    }

    #[test]
    fn test_load_repairs_duplicates_and_zero_quantities() {
        let ledger = ledger();
        let raw = r#"[
            {"id":1,"name":"Coat","price":"100","quantity":1,"seller":"A"},
            {"id":1,"name":"Coat","price":"100","quantity":2,"seller":"A"},
            {"id":2,"name":"Belt","price":"50","quantity":0,"seller":"B"}
        ]"#;
        ledger.store().set(keys::CART, raw).unwrap();

        let lines = ledger.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
    }

    #[test]
    fn test_custom_tax_rate() {
        let ledger = CartLedger::with_tax_rate(MemoryStore::new(), Decimal::new(18, 2));
        ledger.add_item(&product(1, "Coat", 100), 1).unwrap();
        assert_eq!(ledger.tax().unwrap(), Decimal::from(18));
        assert_eq!(ledger.tax_rate(), Decimal::new(18, 2));
    }

    #[test]
    fn test_concurrent_adds_keep_single_line() {
        let ledger = Arc::new(ledger());
        let coat = product(1, "Coat", 100);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                let coat = coat.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        ledger.add_item(&coat, 1).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = ledger.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 80);
    }
}
