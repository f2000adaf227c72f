//! Cross-platform price-comparison records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Product;

/// One retail product paired with at most one wholesale product.
///
/// At least one side is always present; the delta fields are only set
/// when both sides are. A positive delta means the wholesale price is
/// lower (buying wholesale saves money).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Normalized product name the record was grouped under.
    pub match_key: String,
    pub b2c_product: Option<Product>,
    pub b2b_product: Option<Product>,
    /// `b2c price - b2b price`, set when both sides are present.
    pub price_delta: Option<Decimal>,
    /// Delta as a percentage of the retail price; `None` when either
    /// side is missing or the retail price is zero.
    pub price_delta_pct: Option<Decimal>,
}

impl ComparisonRecord {
    /// Pair a retail product with its wholesale match and compute deltas.
    #[must_use]
    pub fn matched(match_key: String, b2c: Product, b2b: Product) -> Self {
        let delta = b2c.price.amount - b2b.price.amount;
        let pct = if b2c.price.amount.is_zero() {
            None
        } else {
            Some((delta / b2c.price.amount * Decimal::ONE_HUNDRED).round_dp(2))
        };
        Self {
            match_key,
            b2c_product: Some(b2c),
            b2b_product: Some(b2b),
            price_delta: Some(delta),
            price_delta_pct: pct,
        }
    }

    /// A retail product with no wholesale counterpart.
    #[must_use]
    pub const fn b2c_only(match_key: String, b2c: Product) -> Self {
        Self {
            match_key,
            b2c_product: Some(b2c),
            b2b_product: None,
            price_delta: None,
            price_delta_pct: None,
        }
    }

    /// A wholesale product with no retail counterpart.
    #[must_use]
    pub const fn b2b_only(match_key: String, b2b: Product) -> Self {
        Self {
            match_key,
            b2c_product: None,
            b2b_product: Some(b2b),
            price_delta: None,
            price_delta_pct: None,
        }
    }

    /// True when both sides are present.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.b2c_product.is_some() && self.b2b_product.is_some()
    }
}

/// Aggregate statistics over a comparison run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComparisonSummary {
    /// Number of records with both sides present.
    pub matched: usize,
    /// Matched records where the wholesale price is lower.
    pub cheaper_on_wholesale: usize,
    /// Average savings percentage across positive-delta matches.
    pub average_savings_pct: Option<Decimal>,
    /// Sum of absolute savings across positive-delta matches (VND).
    pub total_savings: Decimal,
}
