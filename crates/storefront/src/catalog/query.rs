//! Catalog filtering, search and sorting.
//!
//! [`query`] is a pure function: the same products and [`FilterSpec`] always
//! yield the same ordered result, and the input is never modified.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rethread_core::Condition;

use crate::models::Product;

/// Sort order for catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recently listed first.
    #[default]
    Newest,
    /// Cheapest first.
    #[serde(rename = "price-low")]
    PriceAscending,
    /// Most expensive first.
    #[serde(rename = "price-high")]
    PriceDescending,
    /// Highest popularity score first.
    #[serde(rename = "popular")]
    Popularity,
}

impl SortKey {
    /// URL/CLI spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAscending => "price-low",
            Self::PriceDescending => "price-high",
            Self::Popularity => "popular",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "price-low" | "price-asc" => Ok(Self::PriceAscending),
            "price-high" | "price-desc" => Ok(Self::PriceDescending),
            "popular" | "popularity" => Ok(Self::Popularity),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// Inclusive price interval with an optional upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min: Decimal, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    /// Whether `price` lies within the range.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl FromStr for PriceRange {
    type Err = String;

    /// Parses the bucket values the filter panel submits: `"500-1000"`,
    /// `"0-500"`, or open-ended `"5000-"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("price range must look like MIN-MAX or MIN-: {s}"))?;

        let min = Decimal::from_str(min.trim())
            .map_err(|e| format!("invalid minimum price {min:?}: {e}"))?;
        let max = match max.trim() {
            "" => None,
            max => Some(
                Decimal::from_str(max).map_err(|e| format!("invalid maximum price {max:?}: {e}"))?,
            ),
        };

        if min.is_sign_negative() {
            return Err(format!("minimum price cannot be negative: {s}"));
        }
        if max.is_some_and(|max| max < min) {
            return Err(format!("maximum price is below minimum: {s}"));
        }

        Ok(Self { min, max })
    }
}

/// Active catalog constraints.
///
/// `None` / empty-set dimensions are unconstrained. A `Some` that matches
/// nothing (e.g. category `"Shoes"`) is a real constraint and empties the
/// result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: Option<String>,
    pub price: Option<PriceRange>,
    pub conditions: BTreeSet<Condition>,
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub search: Option<String>,
    pub sort: SortKey,
}

impl FilterSpec {
    /// A spec with every dimension unset and the default sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one category (case-insensitive). Blank input clears it.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(category.into());
        self
    }

    /// Restrict to a price range.
    #[must_use]
    pub const fn price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    /// Allow an additional condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.insert(condition);
        self
    }

    /// Allow an additional size.
    #[must_use]
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.sizes.insert(size.into());
        self
    }

    /// Allow an additional color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.colors.insert(color.into());
        self
    }

    /// Allow an additional brand.
    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    /// Free-text search over name, description and brand. Blank input clears it.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = non_blank(term.into());
        self
    }

    /// Set the sort order.
    #[must_use]
    pub const fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Flip a size in or out of the allowed set, like a filter checkbox.
    pub fn toggle_size(&mut self, size: &str) {
        toggle(&mut self.sizes, size.to_owned());
    }

    /// Flip a color in or out of the allowed set.
    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color.to_owned());
    }

    /// Flip a brand in or out of the allowed set.
    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand.to_owned());
    }

    /// Flip a condition in or out of the allowed set.
    pub fn toggle_condition(&mut self, condition: Condition) {
        toggle(&mut self.conditions, condition);
    }

    /// Whether no constraint is active (sort is not a constraint).
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.price.is_none()
            && self.conditions.is_empty()
            && self.sizes.is_empty()
            && self.colors.is_empty()
            && self.brands.is_empty()
            && self.search.is_none()
    }

    /// Whether `product` satisfies every active constraint.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category = self
            .category
            .as_deref()
            .is_none_or(|c| product.category.as_str().eq_ignore_ascii_case(c));
        let price = self.price.is_none_or(|range| range.contains(product.price));
        let condition = allows(&self.conditions, &product.condition);
        let size = allows(&self.sizes, &product.size);
        let color = allows(&self.colors, &product.color);
        let brand = allows(&self.brands, &product.brand);
        let search = self
            .search
            .as_deref()
            .is_none_or(|term| matches_search(product, term));

        category && price && condition && size && color && brand && search
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Empty set allows everything.
fn allows<T: Ord>(set: &BTreeSet<T>, value: &T) -> bool {
    set.is_empty() || set.contains(value)
}

fn matches_search(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    [&product.name, &product.description, &product.brand]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Apply `spec` to `products`.
///
/// Returns references into `products`, filtered by every active constraint
/// and stably sorted by `spec.sort` (ties keep input order).
#[must_use]
pub fn query<'a>(products: &'a [Product], spec: &FilterSpec) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = products.iter().filter(|p| spec.matches(p)).collect();

    // `sort_by` is stable.
    match spec.sort {
        SortKey::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::PriceAscending => result.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDescending => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Popularity => result.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
    }

    tracing::debug!(
        total = products.len(),
        matched = result.len(),
        sort = %spec.sort,
        "Catalog query"
    );

    result
}
