//! Integration tests for catalog filtering, search and sorting.
//!
//! These run against the compiled-in seed catalog and check properties that
//! must hold for any catalog contents.

#![allow(clippy::indexing_slicing)]

use std::collections::HashSet;

use rust_decimal::Decimal;

use rethread_core::{Category, Condition, ProductId};
use rethread_storefront::catalog::{Catalog, CatalogError, FilterSpec, PriceRange, SortKey, options};

fn ids(products: &[&rethread_storefront::models::Product]) -> Vec<ProductId> {
    products.iter().map(|p| p.id).collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_empty_filter_returns_whole_catalog_in_order() {
    let catalog = Catalog::seed();
    let result = catalog.query(&FilterSpec::new());
    let expected: Vec<ProductId> = catalog.all().iter().map(|p| p.id).collect();
    assert_eq!(ids(&result), expected);
}

#[test]
fn test_category_filter_is_case_insensitive() {
    let catalog = Catalog::seed();
    let lower = catalog.query(&FilterSpec::new().category("women"));
    let upper = catalog.query(&FilterSpec::new().category("WOMEN"));

    assert!(!lower.is_empty());
    assert_eq!(ids(&lower), ids(&upper));
    assert!(lower.iter().all(|p| p.category == Category::Women));
}

#[test]
fn test_every_price_bucket_contains_only_its_prices() {
    let catalog = Catalog::seed();
    for (label, value) in options::PRICE_RANGES {
        let range: PriceRange = value.parse().unwrap_or_else(|e| panic!("{label}: {e}"));
        for product in catalog.query(&FilterSpec::new().price(range)) {
            assert!(product.price >= range.min, "{label}: {}", product.name);
            if let Some(max) = range.max {
                assert!(product.price <= max, "{label}: {}", product.name);
            }
        }
    }
}

#[test]
fn test_open_ended_bucket() {
    let catalog = Catalog::seed();
    let range: PriceRange = "5000-".parse().unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(range.max, None);

    let result = catalog.query(&FilterSpec::new().price(range));
    assert!(result.iter().all(|p| p.price >= Decimal::from(5000)));
}

#[test]
fn test_conditions_within_a_group_are_ored() {
    let catalog = Catalog::seed();
    let good = catalog.query(&FilterSpec::new().condition(Condition::Good)).len();
    let fair = catalog.query(&FilterSpec::new().condition(Condition::Fair)).len();
    let either = catalog.query(
        &FilterSpec::new()
            .condition(Condition::Good)
            .condition(Condition::Fair),
    );

    assert_eq!(either.len(), good + fair);
}

#[test]
fn test_groups_are_anded() {
    let catalog = Catalog::seed();
    let spec = FilterSpec::new().category("men").size("M");
    for product in catalog.query(&spec) {
        assert_eq!(product.category, Category::Men);
        assert_eq!(product.size, "M");
    }
}

#[test]
fn test_search_matches_name_description_or_brand() {
    let catalog = Catalog::seed();
    let result = catalog.query(&FilterSpec::new().search("LEVIS"));
    assert!(!result.is_empty());
    for product in result {
        let haystack = format!("{} {} {}", product.name, product.description, product.brand)
            .to_lowercase();
        assert!(haystack.contains("levis"));
    }

    assert!(
        catalog
            .query(&FilterSpec::new().search("no such thing anywhere"))
            .is_empty()
    );
}

#[test]
fn test_blank_search_is_no_filter() {
    let catalog = Catalog::seed();
    assert_eq!(
        catalog.query(&FilterSpec::new().search("   ")).len(),
        catalog.len()
    );
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_price_sorts_are_monotonic() {
    let catalog = Catalog::seed();

    let low = catalog.query(&FilterSpec::new().sort(SortKey::PriceAscending));
    assert!(low.windows(2).all(|w| w[0].price <= w[1].price));

    let high = catalog.query(&FilterSpec::new().sort(SortKey::PriceDescending));
    assert!(high.windows(2).all(|w| w[0].price >= w[1].price));
}

#[test]
fn test_newest_and_popular_sorts() {
    let catalog = Catalog::seed();

    let newest = catalog.query(&FilterSpec::new().sort(SortKey::Newest));
    assert!(newest.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let popular = catalog.query(&FilterSpec::new().sort(SortKey::Popularity));
    assert!(popular.windows(2).all(|w| w[0].popularity >= w[1].popularity));
}

#[test]
fn test_sort_keys_parse_from_cli_names() {
    assert_eq!("price-low".parse::<SortKey>(), Ok(SortKey::PriceAscending));
    assert_eq!("price-high".parse::<SortKey>(), Ok(SortKey::PriceDescending));
    assert_eq!("popular".parse::<SortKey>(), Ok(SortKey::Popularity));
    assert!("cheapest".parse::<SortKey>().is_err());
}

// =============================================================================
// Determinism
// =============================================================================

fn mixed_filters(sort: SortKey) -> Vec<FilterSpec> {
    vec![
        FilterSpec::new().sort(sort),
        FilterSpec::new().search("a").size("L").size("S").sort(sort),
        FilterSpec::new().brand("Levis").brand("Zara").sort(sort),
        FilterSpec::new()
            .condition(Condition::Good)
            .condition(Condition::LikeNew)
            .color("Blue")
            .search("e")
            .sort(sort),
        FilterSpec::new().category("women").search("a").sort(sort),
    ]
}

#[test]
fn test_query_is_repeatable_subset_without_duplicates() {
    let catalog = Catalog::seed();
    let known: HashSet<ProductId> = catalog.all().iter().map(|p| p.id).collect();

    for sort in [
        SortKey::Newest,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::Popularity,
    ] {
        for spec in mixed_filters(sort) {
            let first = ids(&catalog.query(&spec));
            let second = ids(&catalog.query(&spec));
            assert_eq!(first, second, "{spec:?}");

            let unique: HashSet<ProductId> = first.iter().copied().collect();
            assert_eq!(unique.len(), first.len(), "duplicate ids for {spec:?}");
            assert!(unique.is_subset(&known), "unknown ids for {spec:?}");
            assert!(first.len() <= catalog.len());
        }
    }
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn test_lookup_miss_is_not_found() {
    let catalog = Catalog::seed();
    assert!(matches!(
        catalog.find(ProductId::new(404)),
        Err(CatalogError::NotFound(_))
    ));
    assert!(matches!(catalog.find_str("abc"), Err(CatalogError::NotFound(_))));
}
