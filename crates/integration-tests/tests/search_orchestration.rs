//! Integration tests for dual-platform search orchestration.
//!
//! These exercise the merge, dedupe and sort pipeline the facade runs
//! over the two platform clients, using constructed normalized pages
//! instead of live upstream responses.

use mm_catalog_core::Platform;
use mm_catalog_engine::normalize::NormalizedPage;
use mm_catalog_engine::search::{dedupe_products, merge_sides, single_results, sort_products};
use mm_catalog_engine::{CatalogError, MagentoError, SortBy};
use mm_catalog_integration_tests::product;

fn page(products: Vec<mm_catalog_core::Product>, total_count: u32, total_pages: u32) -> NormalizedPage {
    NormalizedPage {
        products,
        total_count,
        total_pages,
        skipped: 0,
    }
}

fn upstream_failure(message: &str) -> CatalogError {
    CatalogError::Upstream(MagentoError::Transient(message.to_string()))
}

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_merge_keeps_retail_first_under_relevance() {
    let b2c = page(
        vec![
            product(Platform::B2c, "R1", "G\u{1ea1}o ST25 5kg", 189_000),
            product(Platform::B2c, "R2", "G\u{1ea1}o n\u{1ebf}p 2kg", 76_000),
        ],
        40,
        2,
    );
    let b2b = page(
        vec![product(Platform::B2b, "W1", "G\u{1ea1}o ST25 5kg", 175_000)],
        12,
        1,
    );

    let results = merge_sides(Ok(b2c), Ok(b2b), SortBy::Relevance).expect("both sides ok");

    assert!(results.warnings.is_empty());
    assert_eq!(results.total_count, 52);
    assert_eq!(results.total_pages, 2);
    let platforms: Vec<Platform> = results.products.iter().map(|p| p.platform).collect();
    assert_eq!(platforms, vec![Platform::B2c, Platform::B2c, Platform::B2b]);
}

#[test]
fn test_one_failing_side_degrades_to_warning() {
    let b2c = page(
        vec![product(Platform::B2c, "R1", "S\u{1eef}a t\u{1b0}\u{1a1}i 1l", 32_000)],
        1,
        1,
    );

    let results = merge_sides(
        Ok(b2c),
        Err(upstream_failure("connection reset")),
        SortBy::Relevance,
    )
    .expect("retail side survived");

    assert_eq!(results.products.len(), 1);
    assert_eq!(results.total_count, 1);
    assert_eq!(results.warnings.len(), 1);
    let warning = results.warnings.first().expect("one warning");
    assert_eq!(warning.platform, Platform::B2b);
    assert!(warning.message.contains("connection reset"));
}

#[test]
fn test_both_sides_failing_propagates_the_retail_error() {
    let err = merge_sides(
        Err(upstream_failure("retail down")),
        Err(upstream_failure("wholesale down")),
        SortBy::Relevance,
    )
    .expect_err("no side survived");

    assert!(err.to_string().contains("retail down"));
}

// =============================================================================
// Dedupe Tests
// =============================================================================

#[test]
fn test_duplicate_sku_on_one_platform_keeps_first() {
    let first = product(Platform::B2c, "R1", "B\u{1ed9}t gi\u{1eb7}t Omo 3kg", 120_000);
    let second = product(Platform::B2c, "R1", "B\u{1ed9}t gi\u{1eb7}t Omo 3kg", 125_000);

    let deduped = dedupe_products(vec![first.clone(), second]);
    assert_eq!(deduped.len(), 1);
    assert_eq!(deduped.first().map(|p| p.price.amount), Some(first.price.amount));
}

#[test]
fn test_same_sku_across_platforms_is_not_a_duplicate() {
    let retail = product(Platform::B2c, "X1", "N\u{1b0}\u{1edb}c m\u{1eaf}m 500ml", 45_000);
    let wholesale = product(Platform::B2b, "X1", "N\u{1b0}\u{1edb}c m\u{1eaf}m 500ml", 41_000);

    let deduped = dedupe_products(vec![retail, wholesale]);
    assert_eq!(deduped.len(), 2);
}

// =============================================================================
// Sort Tests
// =============================================================================

#[test]
fn test_price_sort_spans_both_platforms() {
    let b2c = page(
        vec![product(Platform::B2c, "R1", "D\u{1ea7}u \u{103}n 1l", 52_000)],
        1,
        1,
    );
    let b2b = page(
        vec![product(Platform::B2b, "W1", "D\u{1ea7}u \u{103}n 1l", 47_000)],
        1,
        1,
    );

    let results = merge_sides(Ok(b2c), Ok(b2b), SortBy::PriceAsc).expect("both sides ok");
    let skus: Vec<&str> = results.products.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["W1", "R1"]);
}

#[test]
fn test_name_sort_folds_diacritics() {
    // "Đường" starts with U+0110, far beyond 'z' in code-point order;
    // folded ordering puts it under 'd'
    let mut products = vec![
        product(Platform::B2c, "R1", "G\u{1ea1}o ST25", 189_000),
        product(Platform::B2c, "R2", "\u{110}\u{1b0}\u{1edd}ng c\u{e1}t", 25_000),
        product(Platform::B2c, "R3", "C\u{e1} h\u{1ed9}p", 30_000),
    ];
    sort_products(&mut products, SortBy::NameAsc);

    let skus: Vec<&str> = products.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["R3", "R2", "R1"]);
}

#[test]
fn test_single_platform_results_are_deduped_and_sorted() {
    let page = page(
        vec![
            product(Platform::B2c, "R2", "Mi\u{1ebf}n dong 500g", 28_000),
            product(Platform::B2c, "R1", "M\u{ec} g\u{f3}i th\u{f9}ng 30 g\u{f3}i", 112_000),
            product(Platform::B2c, "R2", "Mi\u{1ebf}n dong 500g", 29_000),
        ],
        3,
        1,
    );

    let results = single_results(page, SortBy::PriceDesc);
    let skus: Vec<&str> = results.products.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["R1", "R2"]);
}
