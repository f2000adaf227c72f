//! Canonical product shape shared by both platforms.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Platform, Price};

/// Stock availability as reported by the upstream catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    #[default]
    Unknown,
}

impl StockStatus {
    /// Map a raw Magento `stock_status` value; anything unrecognized is
    /// `Unknown` rather than an error.
    #[must_use]
    pub fn from_upstream(raw: &str) -> Self {
        match raw {
            "IN_STOCK" => Self::InStock,
            "LOW_STOCK" => Self::LowStock,
            "OUT_OF_STOCK" => Self::OutOfStock,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in stock",
            Self::LowStock => "low stock",
            Self::OutOfStock => "out of stock",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product normalized from either platform's raw response.
///
/// `sku` + `platform` uniquely identify a product instance. Optional
/// upstream fields degrade to empty sentinels instead of `Option`s so
/// callers never branch on presence for display-only data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream numeric id, 0 when the platform omitted it.
    pub id: i64,
    /// Stock-keeping unit, unique within a platform.
    pub sku: String,
    /// Product name (Vietnamese text).
    pub name: String,
    /// Short description, empty when absent upstream.
    pub description: String,
    /// Which platform this instance came from.
    pub platform: Platform,
    /// Final (post-discount) price.
    pub price: Price,
    /// Regular (pre-discount) price; equals `price` when not discounted.
    pub regular_price: Price,
    /// Canonical unit token parsed from the name (e.g. `kg`, `lon`),
    /// empty when none was found.
    pub unit: String,
    pub stock_status: StockStatus,
    /// Numeric store code active when this product was fetched.
    pub store_code: Option<String>,
    /// Product image URL, empty when absent.
    pub image_url: String,
    /// Canonical product page URL on the owning platform.
    pub product_url: String,
    /// Category names, outermost first.
    pub categories: Vec<String>,
    /// Review score in the 0-100 range, when the platform reports one.
    pub rating: Option<f64>,
}

impl Product {
    /// Absolute discount, never negative.
    #[must_use]
    pub fn discount_amount(&self) -> Decimal {
        (self.regular_price.amount - self.price.amount).max(Decimal::ZERO)
    }

    /// True when the final price is below the regular price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.price.amount < self.regular_price.amount
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status == StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrencyCode;

    fn sample(price: i64, regular: i64) -> Product {
        Product {
            id: 1,
            sku: "2001001".to_string(),
            name: "G\u{1ea1}o ST25 t\u{fa}i 5kg".to_string(),
            description: String::new(),
            platform: Platform::B2c,
            price: Price::vnd(price),
            regular_price: Price::vnd(regular),
            unit: "kg".to_string(),
            stock_status: StockStatus::InStock,
            store_code: Some("10010".to_string()),
            image_url: String::new(),
            product_url: String::new(),
            categories: vec![],
            rating: None,
        }
    }

    #[test]
    fn test_stock_status_from_upstream() {
        assert_eq!(StockStatus::from_upstream("IN_STOCK"), StockStatus::InStock);
        assert_eq!(
            StockStatus::from_upstream("OUT_OF_STOCK"),
            StockStatus::OutOfStock
        );
        assert_eq!(StockStatus::from_upstream("LOW_STOCK"), StockStatus::LowStock);
        assert_eq!(StockStatus::from_upstream("BACKORDER"), StockStatus::Unknown);
        assert_eq!(StockStatus::from_upstream(""), StockStatus::Unknown);
    }

    #[test]
    fn test_discount_amount() {
        let p = sample(90_000, 100_000);
        assert_eq!(p.discount_amount(), Decimal::from(10_000));
        assert!(p.has_discount());
    }

    #[test]
    fn test_discount_never_negative() {
        // Regular below final happens on stale upstream data
        let p = sample(100_000, 90_000);
        assert_eq!(p.discount_amount(), Decimal::ZERO);
        assert!(!p.has_discount());
    }

    #[test]
    fn test_price_currency_default() {
        let p = sample(100, 100);
        assert_eq!(p.price.currency_code, CurrencyCode::Vnd);
        assert!(p.is_in_stock());
    }
}
