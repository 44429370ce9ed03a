//! Application state shared across commands.

use std::sync::Arc;

use crate::cart::CartLedger;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::providers::{
    Clock, OrderNumberSource, RandomOrderNumbers, RandomViews, SystemClock, ViewCounter,
};
use crate::services::{
    Checkout, ListingDraft, ListingError, ModerationQueue, PendingListing, SellerDashboard,
    SessionError, SessionStore,
};
use crate::store::{FileStore, KeyValueStore};

/// Time and randomness sources used by the storefront.
pub struct Providers {
    pub clock: Box<dyn Clock>,
    pub orders: Box<dyn OrderNumberSource>,
    pub views: Box<dyn ViewCounter>,
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            clock: Box::new(SystemClock),
            orders: Box::new(RandomOrderNumbers),
            views: Box::new(RandomViews),
        }
    }
}

/// Application state shared across all commands.
///
/// Cheaply cloneable via `Arc`. The cart ledger and session store share one
/// backing store.
pub struct Storefront<S> {
    inner: Arc<StorefrontInner<S>>,
}

struct StorefrontInner<S> {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartLedger<Arc<S>>,
    sessions: SessionStore<Arc<S>>,
    providers: Providers,
}

impl<S> Clone for Storefront<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Storefront<FileStore> {
    /// Open the file-backed store named by `config` with the seed catalog.
    #[must_use]
    pub fn open(config: StorefrontConfig) -> Self {
        let store = FileStore::new(config.store_path.clone());
        Self::new(config, store)
    }
}

impl<S: KeyValueStore> Storefront<S> {
    /// Create state over `store` with the seed catalog and system providers.
    pub fn new(config: StorefrontConfig, store: S) -> Self {
        Self::with_parts(config, store, Catalog::seed(), Providers::default())
    }

    /// Create state from explicit parts.
    pub fn with_parts(
        config: StorefrontConfig,
        store: S,
        catalog: Catalog,
        providers: Providers,
    ) -> Self {
        let store = Arc::new(store);
        let cart = CartLedger::with_tax_rate(Arc::clone(&store), config.tax_rate);
        let sessions = SessionStore::new(store);

        Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                cart,
                sessions,
                providers,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartLedger<Arc<S>> {
        &self.inner.cart
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore<Arc<S>> {
        &self.inner.sessions
    }

    /// Order placement over this storefront's cart.
    #[must_use]
    pub fn checkout(&self) -> Checkout<'_, Arc<S>> {
        let providers = &self.inner.providers;
        Checkout::new(
            &self.inner.cart,
            providers.orders.as_ref(),
            providers.clock.as_ref(),
            self.inner.config.simulated_latency,
        )
    }

    /// Submit a listing as the signed-in seller.
    ///
    /// # Errors
    ///
    /// Returns `ListingError` if the draft is invalid or the user cannot sell.
    pub async fn submit_listing(&self, draft: &ListingDraft) -> Result<PendingListing, ListingError> {
        draft
            .submit(
                &self.inner.sessions,
                self.inner.providers.clock.as_ref(),
                self.inner.config.simulated_latency,
            )
            .await
    }

    /// The signed-in seller's dashboard.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` unless the signed-in role can sell.
    pub fn seller_dashboard(&self) -> Result<SellerDashboard, SessionError> {
        SellerDashboard::for_session(
            &self.inner.sessions,
            &self.inner.catalog,
            self.inner.providers.views.as_ref(),
        )
    }

    /// The admin moderation queue.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` unless the signed-in role is admin.
    pub fn moderation_queue(&self) -> Result<ModerationQueue, SessionError> {
        ModerationQueue::for_session(
            &self.inner.sessions,
            &self.inner.catalog,
            self.inner.providers.views.as_ref(),
        )
    }
}
