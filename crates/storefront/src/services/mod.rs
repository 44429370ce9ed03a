//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `session` - Simulated sign-in backed by the `user` store record
//! - `checkout` - Multi-step checkout form and order placement
//! - `listing` - Seller "list an item" form validation
//! - `dashboard` - Seller listings view and admin moderation queue

pub mod checkout;
pub mod dashboard;
pub mod listing;
pub mod session;

pub use checkout::{Checkout, CheckoutError, CheckoutForm, CheckoutStep, OrderConfirmation};
pub use dashboard::{DashboardItem, ModerationQueue, SellerDashboard, StatusFilter};
pub use listing::{ListingDraft, ListingError, PendingListing};
pub use session::{SessionError, SessionStore};
