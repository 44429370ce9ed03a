//! Closed enumerations used across the marketplace.
//!
//! Every enum here round-trips through `Display`/`FromStr` with the same
//! spelling it uses on the wire, so CLI arguments, persisted records and
//! rendered labels all agree.

use serde::{Deserialize, Serialize};

/// Account role stored in the session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Can browse and buy.
    #[default]
    Buyer,
    /// Can list items for sale.
    Seller,
    /// Buyer and seller.
    Both,
    /// Full access, including listing moderation.
    Admin,
}

/// Something a role may or may not be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Add to cart and check out.
    Buy,
    /// Use the seller dashboard and submit listings.
    Sell,
    /// Approve or reject listings.
    Moderate,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 4] = [Self::Buyer, Self::Seller, Self::Both, Self::Admin];

    /// Whether this role grants `capability`.
    #[must_use]
    pub const fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::Buy => true,
            Capability::Sell => matches!(self, Self::Seller | Self::Both | Self::Admin),
            Capability::Moderate => matches!(self, Self::Admin),
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Both => "both",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            "both" => Ok(Self::Both),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Moderation status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Visible in the catalog.
    Active,
    /// Declined by a moderator.
    Rejected,
    /// Purchased.
    Sold,
}

impl ListingStatus {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Rejected => "rejected",
            Self::Sold => "sold",
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "rejected" => Ok(Self::Rejected),
            "sold" => Ok(Self::Sold),
            _ => Err(format!("invalid listing status: {s}")),
        }
    }
}

/// Wear condition of a second-hand item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Condition {
    #[serde(rename = "New with tags")]
    NewWithTags,
    #[serde(rename = "Like new")]
    LikeNew,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
}

impl Condition {
    /// All conditions, best first.
    pub const ALL: [Self; 4] = [Self::NewWithTags, Self::LikeNew, Self::Good, Self::Fair];

    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewWithTags => "New with tags",
            Self::LikeNew => "Like new",
            Self::Good => "Good",
            Self::Fair => "Fair",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    /// Accepts labels (`"Like new"`) and slugs (`"like-new"`), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("invalid condition: {s}"))
    }
}

/// Top-level catalog department.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    Women,
    Men,
    Kids,
    Accessories,
}

impl Category {
    /// All categories, in navigation order.
    pub const ALL: [Self; 4] = [Self::Women, Self::Men, Self::Kids, Self::Accessories];

    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Women => "Women",
            Self::Men => "Men",
            Self::Kids => "Kids",
            Self::Accessories => "Accessories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Buyer.can(Capability::Buy));
        assert!(!Role::Buyer.can(Capability::Sell));
        assert!(!Role::Buyer.can(Capability::Moderate));

        assert!(Role::Seller.can(Capability::Sell));
        assert!(!Role::Seller.can(Capability::Moderate));

        assert!(Role::Both.can(Capability::Buy));
        assert!(Role::Both.can(Capability::Sell));
        assert!(!Role::Both.can(Capability::Moderate));

        assert!(Role::Admin.can(Capability::Sell));
        assert!(Role::Admin.can(Capability::Moderate));
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Both).unwrap(), "\"both\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_condition_parsing() {
        assert_eq!("Like new".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert_eq!(
            "new-with-tags".parse::<Condition>().unwrap(),
            Condition::NewWithTags
        );
        assert_eq!("FAIR".parse::<Condition>().unwrap(), Condition::Fair);
        assert!("mint".parse::<Condition>().is_err());
    }

    #[test]
    fn test_condition_serde_uses_labels() {
        let json = serde_json::to_string(&Condition::NewWithTags).unwrap();
        assert_eq!(json, "\"New with tags\"");
    }

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!("women".parse::<Category>().unwrap(), Category::Women);
        assert_eq!("ACCESSORIES".parse::<Category>().unwrap(), Category::Accessories);
        assert!("Shoes".parse::<Category>().is_err());
    }

    #[test]
    fn test_listing_status_parsing() {
        assert_eq!("Sold".parse::<ListingStatus>().unwrap(), ListingStatus::Sold);
        assert!("archived".parse::<ListingStatus>().is_err());
    }
}
