//! Seller "list an item" form.
//!
//! Submission validates the draft, checks the signed-in user may sell, waits
//! out the simulated upload and hands back a [`PendingListing`] awaiting
//! moderation. Nothing is persisted.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use rethread_core::{Capability, Category, Condition, ListingStatus};

use crate::providers::{Clock, Latency};
use crate::services::checkout::FieldErrors;
use crate::services::session::{SessionError, SessionStore};
use crate::store::KeyValueStore;

/// Number of image slots on the form.
pub const MAX_IMAGES: usize = 5;

/// Errors from submitting a listing.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("please fix the highlighted fields: {0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Raw form input, as typed by the seller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub original_price: String,
    pub brand: String,
    pub size: String,
    pub color: String,
    pub condition: String,
    pub reason_for_selling: String,
    pub images: Vec<String>,
}

/// A validated listing waiting for an admin to review it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingListing {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub condition: Condition,
    pub reason_for_selling: Option<String>,
    pub images: Vec<String>,
    pub seller: String,
    pub status: ListingStatus,
    pub submitted_on: DateTime<Utc>,
}

impl ListingDraft {
    /// Check every field, collecting one message per failing field.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        self.parse().err().unwrap_or_default()
    }

    /// Validate, require the `Sell` capability and produce a pending listing.
    ///
    /// # Errors
    ///
    /// - `ListingError::Session` if nobody is signed in or the role cannot sell
    /// - `ListingError::Invalid` if any field fails validation
    #[instrument(skip_all, fields(name = %self.name))]
    pub async fn submit<S: KeyValueStore>(
        &self,
        sessions: &SessionStore<S>,
        clock: &dyn Clock,
        latency: Latency,
    ) -> Result<PendingListing, ListingError> {
        let seller = sessions.require(Capability::Sell)?;
        let fields = self.parse().map_err(ListingError::Invalid)?;

        latency.simulate().await;

        let listing = PendingListing {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            category: fields.category,
            price: fields.price,
            original_price: fields.original_price,
            brand: optional(&self.brand),
            size: optional(&self.size),
            color: optional(&self.color),
            condition: fields.condition,
            reason_for_selling: optional(&self.reason_for_selling),
            images: self.images().map(str::to_owned).collect(),
            seller: seller.name,
            status: ListingStatus::Pending,
            submitted_on: clock.now(),
        };

        tracing::info!(
            seller = %listing.seller,
            category = %listing.category,
            price = %listing.price,
            "Listing submitted for review"
        );

        Ok(listing)
    }

    fn images(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
    }

    fn parse(&self) -> Result<ParsedFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name", "Product name is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        }

        let category = required_choice::<Category>(&self.category);
        match &category {
            Err(None) => errors.insert("category", "Category is required"),
            Err(Some(_)) => errors.insert("category", "Category is not recognised"),
            Ok(_) => {}
        }

        let price = if self.price.trim().is_empty() {
            errors.insert("price", "Price is required");
            None
        } else {
            let price = positive_amount(&self.price);
            if price.is_none() {
                errors.insert("price", "Price must be a positive number");
            }
            price
        };

        let original_price = if self.original_price.trim().is_empty() {
            None
        } else {
            let original = positive_amount(&self.original_price);
            if original.is_none() {
                errors.insert("original_price", "Original price must be a positive number");
            }
            original
        };

        let condition = required_choice::<Condition>(&self.condition);
        match &condition {
            Err(None) => errors.insert("condition", "Condition is required"),
            Err(Some(_)) => errors.insert("condition", "Condition is not recognised"),
            Ok(_) => {}
        }

        let image_count = self.images().count();
        if image_count == 0 {
            errors.insert("images", "At least one image is required");
        } else if image_count > MAX_IMAGES {
            errors.insert("images", format!("At most {MAX_IMAGES} images are allowed"));
        }

        match (category, price, condition) {
            (Ok(category), Some(price), Ok(condition)) if errors.is_empty() => Ok(ParsedFields {
                category,
                price,
                original_price,
                condition,
            }),
            _ => Err(errors),
        }
    }
}

struct ParsedFields {
    category: Category,
    price: Decimal,
    original_price: Option<Decimal>,
    condition: Condition,
}

/// `Err(None)` when blank, `Err(Some(_))` when unrecognised.
fn required_choice<T: FromStr>(raw: &str) -> Result<T, Option<T::Err>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(None);
    }
    raw.parse().map_err(Some)
}

fn positive_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}

fn optional(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use rethread_core::{Email, Role};

    use super::*;
    use crate::models::User;
    use crate::providers::FixedClock;
    use crate::store::MemoryStore;

    fn draft() -> ListingDraft {
        ListingDraft {
            name: "Linen Shirt".to_owned(),
            description: "Worn twice".to_owned(),
            category: "men".to_owned(),
            price: "799".to_owned(),
            original_price: "1999".to_owned(),
            brand: "Uniqlo".to_owned(),
            size: " ".to_owned(),
            condition: "like new".to_owned(),
            images: vec!["/uploads/shirt.jpg".to_owned()],
            ..ListingDraft::default()
        }
    }

    fn sessions(role: Role) -> SessionStore<MemoryStore> {
        let sessions = SessionStore::new(MemoryStore::new());
        let user = User::new("Ravi", Email::parse("ravi@rethread.in").unwrap(), role);
        sessions.login(&user).unwrap();
        sessions
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().unwrap())
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_empty());
    }

    #[test]
    fn test_empty_draft_reports_required_fields() {
        let errors = ListingDraft::default().validate();
        assert_eq!(errors.get("name"), Some("Product name is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(errors.get("price"), Some("Price is required"));
        assert_eq!(errors.get("condition"), Some("Condition is required"));
        assert_eq!(errors.get("images"), Some("At least one image is required"));
        assert!(errors.get("original_price").is_none());
    }

    #[test]
    fn test_price_rules() {
        for bad in ["0", "-10", "ten"] {
            let mut d = draft();
            d.price = bad.to_owned();
            assert_eq!(
                d.validate().get("price"),
                Some("Price must be a positive number"),
                "{bad}"
            );
        }

        let mut d = draft();
        d.original_price = "0".to_owned();
        assert_eq!(
            d.validate().get("original_price"),
            Some("Original price must be a positive number")
        );
        d.original_price = String::new();
        assert!(d.validate().is_empty());
    }

    #[test]
    fn test_blank_images_do_not_count() {
        let mut d = draft();
        d.images = vec![String::new(), "  ".to_owned()];
        assert!(d.validate().get("images").is_some());

        d.images = vec!["/a.jpg".to_owned(); MAX_IMAGES + 1];
        assert!(d.validate().get("images").is_some());
    }

    #[test]
    fn test_unknown_category() {
        let mut d = draft();
        d.category = "pets".to_owned();
        assert_eq!(d.validate().get("category"), Some("Category is not recognised"));
    }

    #[tokio::test]
    async fn test_submit_as_seller() {
        let sessions = sessions(Role::Seller);
        let listing = draft()
            .submit(&sessions, &clock(), Latency::NONE)
            .await
            .unwrap();

        assert_eq!(listing.status, ListingStatus::Pending);
        assert_eq!(listing.seller, "Ravi");
        assert_eq!(listing.category, Category::Men);
        assert_eq!(listing.condition, Condition::LikeNew);
        assert_eq!(listing.price, Decimal::from(799));
        assert_eq!(listing.original_price, Some(Decimal::from(1999)));
        assert_eq!(listing.brand.as_deref(), Some("Uniqlo"));
        assert_eq!(listing.size, None);
    }

    #[tokio::test]
    async fn test_submit_requires_sell_capability() {
        let sessions = sessions(Role::Buyer);
        let err = draft()
            .submit(&sessions, &clock(), Latency::NONE)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ListingError::Session(SessionError::Forbidden { .. })
        ));

        let anonymous = SessionStore::new(MemoryStore::new());
        let err = draft()
            .submit(&anonymous, &clock(), Latency::NONE)
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::Session(SessionError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_submit_invalid_draft() {
        let sessions = sessions(Role::Both);
        let err = ListingDraft::default()
            .submit(&sessions, &clock(), Latency::NONE)
            .await
            .unwrap_err();
        match err {
            ListingError::Invalid(errors) => assert_eq!(errors.len(), 6),
            other => panic!("unexpected error: {other}"),
        }
    }
}
