//! Seller commands.
//!
//! # Usage
//!
//! ```bash
//! rethread seller listings --status active --search jacket
//! rethread seller submit --name "Linen Shirt" --description "Worn twice" \
//!     --category men --price 799 --condition "like new" --image shirt.jpg
//! ```

use rethread_storefront::filters::{money, pluralize};
use rethread_storefront::services::{ListingDraft, ListingError, StatusFilter};
use rethread_storefront::store::KeyValueStore;
use rethread_storefront::{AppError, Storefront};

/// Listing form flags.
#[derive(clap::Args)]
pub struct SubmitArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// `women`, `men`, `kids` or `accessories`
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    price: String,
    /// Retail price when new
    #[arg(long, default_value = "")]
    original_price: String,
    #[arg(long, default_value = "")]
    brand: String,
    #[arg(long, default_value = "")]
    size: String,
    #[arg(long, default_value = "")]
    color: String,
    /// `new with tags`, `like new`, `good` or `fair`
    #[arg(long, default_value = "")]
    condition: String,
    #[arg(long, default_value = "")]
    reason: String,
    /// Image reference; repeat for up to five
    #[arg(long = "image")]
    images: Vec<String>,
}

/// Print the signed-in seller's listings.
///
/// # Errors
///
/// Returns `AppError::Session` unless the signed-in role can sell.
pub fn listings<S: KeyValueStore>(
    storefront: &Storefront<S>,
    status: StatusFilter,
    search: &str,
) -> Result<(), AppError> {
    let dashboard = storefront.seller_dashboard()?;
    let currency = storefront.config().currency;
    let rows = dashboard.filtered(status, search);

    println!(
        "{} shown ({} total, filter: {status})",
        pluralize(rows.len(), "listing"),
        dashboard.items().len()
    );
    for item in rows {
        println!(
            "{:>4}  {:<32}  {:>12}  {:<8}  {:>3} views",
            item.product.id.to_string(),
            item.product.name,
            money(item.product.price, currency),
            item.status.as_str(),
            item.views,
        );
    }
    Ok(())
}

/// Submit a listing for review.
///
/// # Errors
///
/// Returns `AppError::Listing` if the form is invalid or the user cannot sell.
pub async fn submit<S: KeyValueStore>(storefront: &Storefront<S>, args: SubmitArgs) -> Result<(), AppError> {
    let draft = ListingDraft {
        name: args.name,
        description: args.description,
        category: args.category,
        price: args.price,
        original_price: args.original_price,
        brand: args.brand,
        size: args.size,
        color: args.color,
        condition: args.condition,
        reason_for_selling: args.reason,
        images: args.images,
    };

    let listing = match storefront.submit_listing(&draft).await {
        Ok(listing) => listing,
        Err(ListingError::Invalid(errors)) => {
            println!("The listing needs attention:");
            for (field, message) in errors.iter() {
                println!("  {field}: {message}");
            }
            return Err(ListingError::Invalid(errors).into());
        }
        Err(e) => return Err(e.into()),
    };
    println!(
        "Submitted \"{}\" at {}. It will be reviewed by our team.",
        listing.name,
        money(listing.price, storefront.config().currency)
    );
    Ok(())
}
