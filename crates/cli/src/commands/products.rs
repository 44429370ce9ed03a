//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! rethread products list --category women --condition "like new" --sort price-low
//! rethread products list --search denim --price 1000-2000
//! rethread products show 4
//! rethread products featured --limit 3
//! ```

use rethread_storefront::Storefront;
use rethread_storefront::catalog::{CatalogError, FilterSpec, options};
use rethread_storefront::filters::{money, pluralize, price_line};
use rethread_storefront::models::Product;
use rethread_storefront::store::KeyValueStore;

fn print_row(product: &Product, storefront: &Storefront<impl KeyValueStore>) {
    println!(
        "{:>4}  {:<32}  {:>12}  {:<13}  {:<4}  {}",
        product.id.to_string(),
        product.name,
        money(product.price, storefront.config().currency),
        product.condition.to_string(),
        product.size,
        product.brand,
    );
}

/// Print every product matching `spec`.
pub fn list<S: KeyValueStore>(storefront: &Storefront<S>, spec: &FilterSpec) {
    let results = storefront.catalog().query(spec);
    println!("{} (sorted by {})", pluralize(results.len(), "product"), spec.sort);
    for product in results {
        print_row(product, storefront);
    }
}

/// Print one product in full.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if `id` names no product.
pub fn show<S: KeyValueStore>(storefront: &Storefront<S>, id: &str) -> Result<(), CatalogError> {
    let product = storefront.catalog().find_str(id)?;
    let currency = storefront.config().currency;

    println!("{} (#{})", product.name, product.id);
    println!("  {}", price_line(product, currency));
    println!("  Category:  {}", product.category);
    println!("  Condition: {}", product.condition);
    println!("  Brand:     {}", product.brand);
    println!("  Size:      {}", product.size);
    println!("  Color:     {}", product.color);
    println!("  Seller:    {}", product.seller);
    println!("  Listed:    {}", product.created_at.format("%B %-d, %Y"));
    println!("  Image:     {}", product.primary_image());
    println!();
    println!("{}", product.description);
    Ok(())
}

/// Print up to `limit` featured products.
pub fn featured<S: KeyValueStore>(storefront: &Storefront<S>, limit: usize) {
    for product in storefront.catalog().featured(limit) {
        print_row(product, storefront);
    }
}

/// Print the filter choices the catalog offers.
pub fn filters() {
    fn join(items: &[&str]) -> String {
        items.join(", ")
    }

    let categories: Vec<&str> = options::CATEGORIES.iter().map(|c| c.as_str()).collect();
    let conditions: Vec<&str> = options::CONDITIONS.iter().map(|c| c.label()).collect();

    println!("Categories: {}", join(&categories));
    println!("Conditions: {}", join(&conditions));
    println!("Sizes:      {}", join(&options::SIZES));
    println!("Colors:     {}", join(&options::COLORS));
    println!("Brands:     {}", join(&options::BRANDS));
    println!("Prices:");
    for (label, value) in options::PRICE_RANGES {
        println!("  {value:<10} {label}");
    }
}
