//! Integration tests for ReThread.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rethread-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_ledger` - Cart persistence and invariants over a file store
//! - `catalog_query` - Filtering, search and sorting over the seed catalog
//! - `checkout_flow` - End-to-end order placement
//! - `session_roles` - Sign-in, capabilities and dashboards
//!
//! Every test gets its own temporary store file and deterministic providers.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;
use tempfile::TempDir;

use rethread_core::{Email, Role};
use rethread_storefront::catalog::Catalog;
use rethread_storefront::config::StorefrontConfig;
use rethread_storefront::models::User;
use rethread_storefront::providers::{FixedClock, PopularityViews, SequentialOrderNumbers};
use rethread_storefront::services::checkout::{PaymentDetails, ShippingDetails};
use rethread_storefront::store::FileStore;
use rethread_storefront::{Providers, Storefront};

/// First order number handed out by [`TestContext`].
pub const FIRST_ORDER_NUMBER: u32 = 424_242;

/// A storefront over a throwaway store file.
pub struct TestContext {
    dir: TempDir,
    pub storefront: Storefront<FileStore>,
}

impl TestContext {
    /// Fresh context with the seed catalog.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storefront = Self::open_at(dir.path().join("store.json"));
        Self { dir, storefront }
    }

    /// Path of the backing store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    /// A second storefront over the same file, as a later CLI invocation would see it.
    #[must_use]
    pub fn reopen(&self) -> Storefront<FileStore> {
        Self::open_at(self.store_path())
    }

    fn open_at(path: PathBuf) -> Storefront<FileStore> {
        let config = StorefrontConfig {
            store_path: path.clone(),
            ..StorefrontConfig::default()
        };
        let providers = Providers {
            clock: Box::new(FixedClock(fixed_now())),
            orders: Box::new(SequentialOrderNumbers::starting_at(FIRST_ORDER_NUMBER)),
            views: Box::new(PopularityViews),
        };
        Storefront::with_parts(config, FileStore::new(path), Catalog::seed(), providers)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The instant every [`TestContext`] clock reports.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 12, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A signed-in user record.
///
/// # Panics
///
/// Panics if `email` is not a valid address.
#[must_use]
#[allow(clippy::expect_used)]
pub fn user(name: &str, email: &str, role: Role) -> User {
    User::new(name, Email::parse(email).expect("valid email"), role)
}

/// Shipping details that pass validation.
#[must_use]
pub fn valid_shipping() -> ShippingDetails {
    ShippingDetails {
        first_name: "Meera".to_owned(),
        last_name: "Iyer".to_owned(),
        email: "meera@example.in".to_owned(),
        phone: "9123456780".to_owned(),
        address: "4 Park Street".to_owned(),
        city: "Kolkata".to_owned(),
        state: "West Bengal".to_owned(),
        pincode: "700016".to_owned(),
    }
}

/// Payment details that pass validation.
#[must_use]
pub fn valid_payment() -> PaymentDetails {
    PaymentDetails {
        card_name: "Meera Iyer".to_owned(),
        card_number: SecretString::from("4111111111111111"),
        expiry: "11/29".to_owned(),
        cvv: SecretString::from("321"),
    }
}
