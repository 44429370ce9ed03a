//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! rethread cart add 3 --quantity 2
//! rethread cart set 3 5
//! rethread cart remove 3
//! rethread cart show
//! rethread cart clear
//! ```

use rethread_core::ProductId;
use rethread_storefront::cart::LineChange;
use rethread_storefront::filters::{money, percent, pluralize};
use rethread_storefront::store::KeyValueStore;
use rethread_storefront::{AppError, Storefront};

fn parse_id(raw: &str) -> Result<ProductId, AppError> {
    raw.parse()
        .map_err(|e| AppError::BadRequest(format!("{e}")))
}

fn report(change: LineChange, what: &str) {
    match change {
        LineChange::Rejected => println!("Quantity must be a whole number of at least 1; cart unchanged."),
        LineChange::Unchanged => println!("{what} is not in your cart."),
        LineChange::Added => println!("Added {what} to your cart."),
        LineChange::Incremented(quantity) => println!("{what} now has quantity {quantity}."),
        LineChange::Updated => println!("Updated {what}."),
        LineChange::Removed => println!("Removed {what}."),
        LineChange::Cleared => println!("Cart cleared."),
    }
}

/// Print the cart lines and totals.
///
/// # Errors
///
/// Returns `AppError::Store` if the cart cannot be read.
pub fn show<S: KeyValueStore>(storefront: &Storefront<S>) -> Result<(), AppError> {
    let cart = storefront.cart();
    let currency = storefront.config().currency;
    let lines = cart.lines()?;

    if lines.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for line in &lines {
        println!(
            "{:>4}  {:<32}  {:>3} x {:>12}  {:>12}  (sold by {})",
            line.product_id.to_string(),
            line.name,
            line.quantity,
            money(line.unit_price, currency),
            money(line.line_total(), currency),
            line.seller,
        );
    }

    let totals = cart.totals()?;
    let items: u64 = lines.iter().map(|l| u64::from(l.quantity)).sum();
    println!();
    println!("{} in {}", pluralize(items, "item"), pluralize(lines.len(), "line"));
    println!("Subtotal: {:>12}", money(totals.subtotal, currency));
    println!(
        "Tax ({}): {:>11}",
        percent(cart.tax_rate()),
        money(totals.tax, currency)
    );
    println!("Total:    {:>12}", money(totals.total, currency));
    Ok(())
}

/// Add `quantity` of the product `id`.
///
/// # Errors
///
/// Returns `AppError::Catalog` for an unknown product, or `AppError::Store`.
pub fn add<S: KeyValueStore>(storefront: &Storefront<S>, id: &str, quantity: &str) -> Result<(), AppError> {
    let product = storefront.catalog().find_str(id)?;
    let change = storefront.cart().add_item_input(product, quantity)?;
    report(change, &product.name);
    Ok(())
}

/// Replace the quantity of the line for `id`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed id, or `AppError::Store`.
pub fn set<S: KeyValueStore>(storefront: &Storefront<S>, id: &str, quantity: &str) -> Result<(), AppError> {
    let id = parse_id(id)?;
    let change = storefront.cart().set_quantity_input(id, quantity)?;
    report(change, &format!("Product {id}"));
    Ok(())
}

/// Remove the line for `id`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed id, or `AppError::Store`.
pub fn remove<S: KeyValueStore>(storefront: &Storefront<S>, id: &str) -> Result<(), AppError> {
    let id = parse_id(id)?;
    let change = storefront.cart().remove_item(id)?;
    report(change, &format!("Product {id}"));
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `AppError::Store` if the store cannot be written.
pub fn clear<S: KeyValueStore>(storefront: &Storefront<S>) -> Result<(), AppError> {
    let change = storefront.cart().clear()?;
    report(change, "cart");
    Ok(())
}
