//! Unified error handling.
//!
//! Each module owns a `thiserror` enum; `AppError` wraps them so callers
//! that drive several services (the CLI) can use one `Result<T>`.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::{CheckoutError, ListingError, SessionError};
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store read or write failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Sign-in state did not permit the operation.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Order placement failed.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// Listing submission failed.
    #[error("Listing rejected: {0}")]
    Listing(#[from] ListingError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caller supplied input that could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the failure came from the caller rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Catalog(_) | Self::Listing(_) | Self::BadRequest(_) => true,
            Self::Session(err) => !matches!(err, SessionError::Store(_)),
            Self::Checkout(err) => !matches!(err, CheckoutError::Store(_)),
            Self::Store(_) | Self::Config(_) => false,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use rethread_core::{Capability, Role};

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CatalogError::NotFound("123".to_string()));
        assert_eq!(err.to_string(), "product not found: 123");

        let err = AppError::BadRequest("invalid quantity".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid quantity");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout failed: your cart is empty");
    }

    #[test]
    fn test_user_error_classification() {
        assert!(AppError::from(CheckoutError::EmptyCart).is_user_error());
        assert!(AppError::from(SessionError::NotSignedIn).is_user_error());
        assert!(
            AppError::from(SessionError::Forbidden {
                role: Role::Buyer,
                capability: Capability::Sell,
            })
            .is_user_error()
        );
        assert!(!AppError::from(StoreError::Poisoned).is_user_error());
        assert!(
            !AppError::from(ConfigError::InvalidEnvVar("X".into(), "bad".into())).is_user_error()
        );
    }
}
