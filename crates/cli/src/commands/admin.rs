//! Admin moderation commands.
//!
//! # Usage
//!
//! ```bash
//! rethread admin queue
//! rethread admin queue --status all --search priya
//! ```

use rethread_storefront::filters::pluralize;
use rethread_storefront::services::StatusFilter;
use rethread_storefront::store::KeyValueStore;
use rethread_storefront::{AppError, Storefront};

/// Print the moderation queue.
///
/// # Errors
///
/// Returns `AppError::Session` unless the signed-in role is admin.
pub fn queue<S: KeyValueStore>(
    storefront: &Storefront<S>,
    status: StatusFilter,
    search: &str,
) -> Result<(), AppError> {
    let queue = storefront.moderation_queue()?;
    let rows = queue.filtered(status, search);

    println!(
        "{} awaiting review; showing {} (filter: {status})",
        pluralize(queue.pending_count(), "listing"),
        rows.len()
    );
    for item in rows {
        println!(
            "{:>4}  {:<32}  {:<16}  {}",
            item.product.id.to_string(),
            item.product.name,
            item.product.seller,
            item.status.as_str(),
        );
    }
    Ok(())
}
