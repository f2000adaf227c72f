//! Normalization of raw Magento records into the canonical model.
//!
//! One pure mapping per platform record. Missing display-only fields
//! (image, description, categories) degrade to empty sentinels; missing
//! identity or price data is `MalformedData`. Malformed records are
//! skipped batch-wise, never fatal for the page.

use mm_catalog_core::{CurrencyCode, Platform, Price, Product, StockStatus};
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{CatalogError, Result};
use crate::magento::response::{RawMoney, RawProduct, RawSearchPage};
use crate::text;

/// A normalized page of search results.
#[derive(Debug, Clone, Default)]
pub struct NormalizedPage {
    pub products: Vec<Product>,
    /// Upstream-reported total matches (not the page length).
    pub total_count: u32,
    pub total_pages: u32,
    /// Records dropped as malformed while mapping this page.
    pub skipped: usize,
}

/// Map one raw product into the canonical model.
///
/// # Errors
///
/// `CatalogError::MalformedData` when the record is missing its SKU or
/// name, or its price fails to parse as a non-negative decimal in a
/// known currency.
pub fn normalize_product(
    raw: RawProduct,
    platform: Platform,
    store_code: Option<&str>,
) -> Result<Product> {
    let sku = raw
        .sku
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CatalogError::MalformedData("record without sku".to_string()))?;
    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CatalogError::MalformedData(format!("sku {sku}: record without name")))?;

    let price_set = raw
        .price_range
        .and_then(|r| r.maximum_price)
        .ok_or_else(|| CatalogError::MalformedData(format!("sku {sku}: record without price")))?;
    let price = normalize_money(price_set.final_price, &sku)?;
    let regular_price = match price_set.regular_price {
        Some(money) => normalize_money(Some(money), &sku)?,
        None => price,
    };

    let product_url = raw
        .url_key
        .as_deref()
        .map(|key| product_url(platform, key))
        .unwrap_or_default();

    let unit = text::parse_unit(&name);

    Ok(Product {
        id: raw.id.unwrap_or(0),
        sku,
        name,
        description: raw
            .short_description
            .and_then(|d| d.html)
            .unwrap_or_default(),
        platform,
        price,
        regular_price,
        unit,
        stock_status: raw
            .stock_status
            .as_deref()
            .map_or(StockStatus::Unknown, StockStatus::from_upstream),
        store_code: store_code.map(ToString::to_string),
        image_url: raw.small_image.and_then(|i| i.url).unwrap_or_default(),
        product_url,
        categories: raw
            .categories
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| c.name)
            .collect(),
        rating: raw.rating_summary,
    })
}

/// Map a raw search page, skipping malformed records.
///
/// Each skip is logged and counted; the rest of the batch is unaffected.
#[must_use]
pub fn normalize_page(
    page: RawSearchPage,
    platform: Platform,
    store_code: Option<&str>,
) -> NormalizedPage {
    let total_count = page.total_count;
    let total_pages = page.page_info.total_pages;
    let mut products = Vec::with_capacity(page.items.len());
    let mut skipped = 0usize;

    for item in page.items {
        match normalize_product(item, platform, store_code) {
            Ok(product) => products.push(product),
            Err(err) => {
                warn!(%platform, error = %err, "skipping malformed upstream record");
                skipped += 1;
            }
        }
    }

    NormalizedPage {
        products,
        total_count,
        total_pages,
        skipped,
    }
}

/// Parse an upstream money value into a canonical two-digit decimal.
///
/// The backends emit values as JSON numbers or as decimal strings; both
/// are accepted. Unparseable, negative, or unknown-currency values are
/// `MalformedData` - never silently truncated.
fn normalize_money(money: Option<RawMoney>, sku: &str) -> Result<Price> {
    let money = money
        .ok_or_else(|| CatalogError::MalformedData(format!("sku {sku}: missing price value")))?;

    let currency = match money.currency.as_deref() {
        // Both platforms default to VND and occasionally omit the code
        None => CurrencyCode::Vnd,
        Some(code) => code.parse::<CurrencyCode>().map_err(|_| {
            CatalogError::MalformedData(format!("sku {sku}: unknown currency {code:?}"))
        })?,
    };

    let raw = money
        .value
        .ok_or_else(|| CatalogError::MalformedData(format!("sku {sku}: missing price value")))?;
    let amount = parse_decimal(&raw).ok_or_else(|| {
        CatalogError::MalformedData(format!("sku {sku}: unparseable price {raw}"))
    })?;

    if amount.is_sign_negative() {
        return Err(CatalogError::MalformedData(format!(
            "sku {sku}: negative price {amount}"
        )));
    }

    Ok(Price::new(amount.round_dp(2), currency))
}

fn parse_decimal(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        serde_json::Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

fn product_url(platform: Platform, url_key: &str) -> String {
    match platform {
        Platform::B2c => format!("https://online.mmvietnam.com/{url_key}.html"),
        Platform::B2b => format!("https://mmpro.vn/product/{url_key}.html"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magento::response::RawPageInfo;

    fn raw_product(sku: &str, name: &str, value: serde_json::Value) -> RawProduct {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "uid": "NDI=",
            "sku": sku,
            "name": name,
            "price_range": {
                "maximum_price": {
                    "final_price": { "currency": "VND", "value": value },
                    "regular_price": { "currency": "VND", "value": value }
                }
            },
            "stock_status": "IN_STOCK",
            "url_key": "gao-st25-tui-5kg"
        }))
        .expect("valid raw product json")
    }

    #[test]
    fn test_normalize_full_record() {
        let raw = raw_product("2001", "G\u{1ea1}o ST25 t\u{fa}i 5kg", 189_000.into());
        let product = normalize_product(raw, Platform::B2c, Some("10010")).expect("normalizes");

        assert_eq!(product.sku, "2001");
        assert_eq!(product.platform, Platform::B2c);
        assert_eq!(product.price.amount, Decimal::from(189_000));
        assert_eq!(product.unit, "kg");
        assert_eq!(product.stock_status, StockStatus::InStock);
        assert_eq!(product.store_code.as_deref(), Some("10010"));
        assert_eq!(
            product.product_url,
            "https://online.mmvietnam.com/gao-st25-tui-5kg.html"
        );
        // Absent optional fields degrade to sentinels
        assert_eq!(product.description, "");
        assert_eq!(product.image_url, "");
        assert!(product.categories.is_empty());
        assert_eq!(product.rating, None);
    }

    #[test]
    fn test_wholesale_product_url() {
        let raw = raw_product("3001", "D\u{1ea7}u \u{103}n 1l", 50_000.into());
        let product = normalize_product(raw, Platform::B2b, None).expect("normalizes");
        assert_eq!(
            product.product_url,
            "https://mmpro.vn/product/gao-st25-tui-5kg.html"
        );
        assert!(product.store_code.is_none());
    }

    #[test]
    fn test_string_price_parses() {
        let raw = raw_product("2002", "S\u{1eef}a 1 l\u{ed}t", "125000.50".into());
        let product = normalize_product(raw, Platform::B2c, None).expect("normalizes");
        assert_eq!(product.price.amount, "125000.50".parse::<Decimal>().expect("decimal"));
    }

    #[test]
    fn test_missing_sku_is_malformed() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "name": "kh\u{f4}ng sku",
            "price_range": { "maximum_price": {
                "final_price": { "currency": "VND", "value": 1000 } } }
        }))
        .expect("valid json");
        let err = normalize_product(raw, Platform::B2c, None).expect_err("rejected");
        assert!(matches!(err, CatalogError::MalformedData(_)));
    }

    #[test]
    fn test_negative_price_is_malformed() {
        let raw = raw_product("2003", "gi\u{e1} \u{e2}m", (-5).into());
        let err = normalize_product(raw, Platform::B2c, None).expect_err("rejected");
        assert!(matches!(err, CatalogError::MalformedData(_)));
    }

    #[test]
    fn test_garbage_price_is_malformed() {
        let raw = raw_product("2004", "gi\u{e1} h\u{1ecf}ng", "not-a-number".into());
        let err = normalize_product(raw, Platform::B2c, None).expect_err("rejected");
        assert!(matches!(err, CatalogError::MalformedData(_)));
    }

    #[test]
    fn test_unknown_currency_is_malformed() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "sku": "2005",
            "name": "ngo\u{1ea1}i t\u{1ec7}",
            "price_range": { "maximum_price": {
                "final_price": { "currency": "XAU", "value": 1000 } } }
        }))
        .expect("valid json");
        let err = normalize_product(raw, Platform::B2c, None).expect_err("rejected");
        assert!(matches!(err, CatalogError::MalformedData(_)));
    }

    #[test]
    fn test_unknown_stock_status_degrades() {
        let mut raw = raw_product("2006", "h\u{e0}ng l\u{1ea1}", 1000.into());
        raw.stock_status = Some("BACKORDER".to_string());
        let product = normalize_product(raw, Platform::B2c, None).expect("normalizes");
        assert_eq!(product.stock_status, StockStatus::Unknown);
    }

    #[test]
    fn test_normalize_page_skips_malformed_and_continues() {
        let page = RawSearchPage {
            items: vec![
                raw_product("2001", "G\u{1ea1}o ST25 t\u{fa}i 5kg", 189_000.into()),
                raw_product("2002", "gi\u{e1} h\u{1ecf}ng", "garbage".into()),
                raw_product("2003", "D\u{1ea7}u \u{103}n 1l", 50_000.into()),
            ],
            total_count: 3,
            page_info: RawPageInfo { total_pages: 1 },
        };

        let normalized = normalize_page(page, Platform::B2c, Some("10010"));
        assert_eq!(normalized.products.len(), 2);
        assert_eq!(normalized.skipped, 1);
        assert_eq!(normalized.total_count, 3);
        assert_eq!(normalized.total_pages, 1);
    }

    #[test]
    fn test_price_rounded_to_two_digits() {
        let raw = raw_product("2007", "l\u{1ebb}", "999.999".into());
        let product = normalize_product(raw, Platform::B2c, None).expect("normalizes");
        assert_eq!(product.price.amount, Decimal::new(100_000, 2)); // 1000.00
    }
}
