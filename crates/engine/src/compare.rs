//! Cross-platform product matching and price comparison.
//!
//! The two platforms do not share SKUs for the same physical item, so
//! matching is a heuristic over normalized names plus pack-size
//! compatibility. Greedy one-to-one assignment in retail relevance
//! order: each wholesale product is claimed at most once.

use mm_catalog_core::{ComparisonRecord, ComparisonSummary, Product};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::search::PlatformWarning;
use crate::text;

/// Minimum Jaro-Winkler similarity over normalized names for two
/// listings to be treated as the same underlying item.
///
/// Tunable; 0.85 keeps brand-variant names apart while tolerating the
/// platforms' spelling and word-order drift.
pub const MIN_NAME_SIMILARITY: f64 = 0.85;

/// Comparison output: ordered records plus aggregate statistics and any
/// per-platform warnings from the dual fetch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonReport {
    pub records: Vec<ComparisonRecord>,
    pub summary: ComparisonSummary,
    pub warnings: Vec<PlatformWarning>,
}

/// Matching signature derived from a product.
#[derive(Debug, Clone)]
struct MatchKey {
    name: String,
    numbers: Vec<Decimal>,
    unit: String,
}

impl MatchKey {
    fn of(product: &Product) -> Self {
        let name = text::normalize_name(&product.name);
        let numbers = text::numeric_signature(&name);
        Self {
            name,
            numbers,
            unit: product.unit.clone(),
        }
    }

    /// Hard compatibility gate checked before name similarity: numeric
    /// signatures must agree (or one side has none) and units must be
    /// identical or convertible.
    fn compatible(&self, other: &Self) -> bool {
        let numbers_agree =
            self.numbers.is_empty() || other.numbers.is_empty() || self.numbers == other.numbers;
        numbers_agree && text::units_compatible(&self.unit, &other.unit)
    }
}

/// Pair retail products with wholesale candidates.
///
/// Greedy in retail order. Tie-break among equally compatible
/// candidates: highest similarity, then lowest wholesale price.
/// Products left without a partner on either side become one-sided
/// records rather than being dropped.
#[must_use]
pub fn match_products(b2c: Vec<Product>, b2b: Vec<Product>) -> Vec<ComparisonRecord> {
    let b2c_keys: Vec<MatchKey> = b2c.iter().map(MatchKey::of).collect();
    let b2b_keys: Vec<MatchKey> = b2b.iter().map(MatchKey::of).collect();
    let mut claimed = vec![false; b2b.len()];
    let mut pairs: Vec<(usize, Option<usize>)> = Vec::with_capacity(b2c.len());

    for (i, retail_key) in b2c_keys.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        for (j, wholesale_key) in b2b_keys.iter().enumerate() {
            if claimed.get(j).copied().unwrap_or(true) || !retail_key.compatible(wholesale_key) {
                continue;
            }
            let similarity = strsim::jaro_winkler(&retail_key.name, &wholesale_key.name);
            if similarity < MIN_NAME_SIMILARITY {
                continue;
            }
            let wins = best.is_none_or(|(best_j, best_sim)| {
                similarity > best_sim
                    || ((similarity - best_sim).abs() < f64::EPSILON
                        && cheaper_than(&b2b, j, best_j))
            });
            if wins {
                best = Some((j, similarity));
            }
        }
        if let Some((j, _)) = best
            && let Some(flag) = claimed.get_mut(j)
        {
            *flag = true;
        }
        pairs.push((i, best.map(|(j, _)| j)));
    }

    let mut records = Vec::with_capacity(b2c.len() + b2b.len());
    let mut b2b_slots: Vec<Option<Product>> = b2b.into_iter().map(Some).collect();
    for (i, (retail, key)) in b2c.into_iter().zip(b2c_keys).enumerate() {
        let partner = pairs
            .iter()
            .find(|(idx, _)| *idx == i)
            .and_then(|(_, j)| *j)
            .and_then(|j| b2b_slots.get_mut(j).and_then(Option::take));
        match partner {
            Some(wholesale) => {
                records.push(ComparisonRecord::matched(key.name, retail, wholesale));
            }
            None => records.push(ComparisonRecord::b2c_only(key.name, retail)),
        }
    }
    for (slot, key) in b2b_slots.into_iter().zip(b2b_keys) {
        if let Some(wholesale) = slot {
            records.push(ComparisonRecord::b2b_only(key.name, wholesale));
        }
    }

    records
}

/// Order records for presentation: matched records by absolute delta
/// percentage descending (undefined percentages after defined ones),
/// unmatched records last. Stable within each band.
pub fn order_records(records: &mut [ComparisonRecord]) {
    records.sort_by(|a, b| {
        band(a)
            .cmp(&band(b))
            .then_with(|| abs_pct(b).cmp(&abs_pct(a)))
    });
}

const fn band(record: &ComparisonRecord) -> u8 {
    if record.is_matched() {
        if record.price_delta_pct.is_some() { 0 } else { 1 }
    } else {
        2
    }
}

fn abs_pct(record: &ComparisonRecord) -> Decimal {
    record.price_delta_pct.map_or(Decimal::ZERO, |p| p.abs())
}

/// Aggregate statistics over an ordered record set.
#[must_use]
pub fn summarize(records: &[ComparisonRecord]) -> ComparisonSummary {
    let mut summary = ComparisonSummary::default();
    let mut savings_pct_total = Decimal::ZERO;

    for record in records {
        if !record.is_matched() {
            continue;
        }
        summary.matched += 1;
        if let Some(delta) = record.price_delta
            && delta > Decimal::ZERO
        {
            summary.cheaper_on_wholesale += 1;
            summary.total_savings += delta;
            if let Some(pct) = record.price_delta_pct {
                savings_pct_total += pct;
            }
        }
    }

    if summary.cheaper_on_wholesale > 0 {
        summary.average_savings_pct = Some(
            (savings_pct_total / Decimal::from(summary.cheaper_on_wholesale)).round_dp(2),
        );
    }

    summary
}

fn cheaper_than(products: &[Product], j: usize, other: usize) -> bool {
    match (products.get(j), products.get(other)) {
        (Some(a), Some(b)) => a.price.amount < b.price.amount,
        _ => false,
    }
}
