//! Seller and admin dashboards.
//!
//! Both views are derived from the catalog on construction and live only in
//! memory. Deleting, approving or rejecting changes the view, not the
//! catalog.

use std::str::FromStr;

use serde::Serialize;

use rethread_core::{Capability, ListingStatus, ProductId};

use crate::catalog::{Catalog, CatalogError};
use crate::models::Product;
use crate::providers::ViewCounter;
use crate::services::session::{SessionError, SessionStore};
use crate::store::KeyValueStore;

/// Status filter for dashboard tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ListingStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: ListingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

/// One row of a dashboard table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardItem {
    pub product: Product,
    pub status: ListingStatus,
    pub views: u32,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// A seller's own listings.
#[derive(Debug, Clone, Default)]
pub struct SellerDashboard {
    items: Vec<DashboardItem>,
}

impl SellerDashboard {
    /// Every third catalog product. Rows are shown as active; nothing in the
    /// catalog records a seller-side status.
    #[must_use]
    pub fn new(catalog: &Catalog, views: &dyn ViewCounter) -> Self {
        let items = catalog
            .all()
            .iter()
            .step_by(3)
            .map(|product| DashboardItem {
                product: product.clone(),
                status: ListingStatus::Active,
                views: views.views(product),
            })
            .collect();
        Self { items }
    }

    /// The dashboard for the signed-in seller.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` unless the signed-in role can sell.
    pub fn for_session<S: KeyValueStore>(
        sessions: &SessionStore<S>,
        catalog: &Catalog,
        views: &dyn ViewCounter,
    ) -> Result<Self, SessionError> {
        let seller = sessions.require(Capability::Sell)?;
        tracing::debug!(seller = %seller.name, "Loading seller dashboard");
        Ok(Self::new(catalog, views))
    }

    #[must_use]
    pub fn items(&self) -> &[DashboardItem] {
        &self.items
    }

    /// Rows matching `status` whose name or description contains `search`.
    #[must_use]
    pub fn filtered(&self, status: StatusFilter, search: &str) -> Vec<&DashboardItem> {
        let needle = search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| status.matches(item.status))
            .filter(|item| {
                contains_ci(&item.product.name, &needle)
                    || contains_ci(&item.product.description, &needle)
            })
            .collect()
    }

    /// Drop a listing from the view.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the view has no such listing.
    pub fn delete(&mut self, id: ProductId) -> Result<(), CatalogError> {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != id);
        if self.items.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        tracing::info!(product_id = %id, "Listing deleted");
        Ok(())
    }
}

/// The admin review queue over every catalog product.
#[derive(Debug, Clone, Default)]
pub struct ModerationQueue {
    items: Vec<DashboardItem>,
}

impl ModerationQueue {
    /// Statuses cycle pending, active, rejected by catalog position.
    #[must_use]
    pub fn new(catalog: &Catalog, views: &dyn ViewCounter) -> Self {
        const CYCLE: [ListingStatus; 3] = [
            ListingStatus::Pending,
            ListingStatus::Active,
            ListingStatus::Rejected,
        ];

        let items = catalog
            .all()
            .iter()
            .zip(CYCLE.iter().cycle())
            .map(|(product, status)| DashboardItem {
                product: product.clone(),
                status: *status,
                views: views.views(product),
            })
            .collect();
        Self { items }
    }

    /// The queue, provided the signed-in role can moderate.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` unless the signed-in role is admin.
    pub fn for_session<S: KeyValueStore>(
        sessions: &SessionStore<S>,
        catalog: &Catalog,
        views: &dyn ViewCounter,
    ) -> Result<Self, SessionError> {
        sessions.require(Capability::Moderate)?;
        Ok(Self::new(catalog, views))
    }

    #[must_use]
    pub fn items(&self) -> &[DashboardItem] {
        &self.items
    }

    /// Rows matching `status` whose name or seller contains `search`.
    #[must_use]
    pub fn filtered(&self, status: StatusFilter, search: &str) -> Vec<&DashboardItem> {
        let needle = search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| status.matches(item.status))
            .filter(|item| {
                contains_ci(&item.product.name, &needle)
                    || contains_ci(&item.product.seller, &needle)
            })
            .collect()
    }

    /// Number of listings awaiting review.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status == ListingStatus::Pending)
            .count()
    }

    /// Mark a listing active.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id.
    pub fn approve(&mut self, id: ProductId) -> Result<(), CatalogError> {
        self.set_status(id, ListingStatus::Active)
    }

    /// Mark a listing rejected.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id.
    pub fn reject(&mut self, id: ProductId) -> Result<(), CatalogError> {
        self.set_status(id, ListingStatus::Rejected)
    }

    fn set_status(&mut self, id: ProductId, status: ListingStatus) -> Result<(), CatalogError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.product.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        item.status = status;
        tracing::info!(product_id = %id, %status, "Listing moderated");
        Ok(())
    }
}
