//! Integration tests for the MM Mega Market catalog engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mm-catalog-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `search_orchestration` - dual-platform fan-out, merge and sorting
//! - `price_comparison` - cross-platform matching and delta reporting
//! - `session_lifecycle` - store selection plus wholesale auth state
//! - `store_selection` - store registry and code-form handling
//!
//! Everything here runs against the library APIs with constructed
//! fixtures; no network access is required.

use mm_catalog_core::{Platform, Price, Product, StockStatus};
use rust_decimal::Decimal;

/// Build a product fixture the way the normalizer would emit one.
#[must_use]
pub fn product(platform: Platform, sku: &str, name: &str, price_vnd: i64) -> Product {
    Product {
        id: 0,
        sku: sku.to_string(),
        name: name.to_string(),
        description: String::new(),
        platform,
        price: Price::vnd(price_vnd),
        regular_price: Price::vnd(price_vnd),
        unit: mm_catalog_engine::text::parse_unit(name),
        stock_status: StockStatus::InStock,
        store_code: Some("10010".to_string()),
        image_url: String::new(),
        product_url: String::new(),
        categories: vec![],
        rating: None,
    }
}

/// A product with distinct final and regular prices.
#[must_use]
pub fn discounted(
    platform: Platform,
    sku: &str,
    name: &str,
    price_vnd: i64,
    regular_vnd: i64,
) -> Product {
    let mut p = product(platform, sku, name, price_vnd);
    p.regular_price = Price::vnd(regular_vnd);
    p
}

/// Decimal helper for assertions on VND amounts.
#[must_use]
pub fn vnd(amount: i64) -> Decimal {
    Decimal::from(amount)
}
