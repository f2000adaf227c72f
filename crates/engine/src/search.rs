//! Search request shaping, merging and ordering.
//!
//! The async fan-out lives on the [`crate::Catalog`] facade; everything
//! here is pure so merge and ordering rules can be tested without a
//! network.

use std::collections::HashSet;

use mm_catalog_core::{Platform, Product};
use serde::Serialize;

use crate::error::Result;
use crate::normalize::NormalizedPage;
use crate::text;

/// Which platform(s) a search should hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformScope {
    #[default]
    B2c,
    B2b,
    Both,
}

impl std::str::FromStr for PlatformScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "b2c" => Ok(Self::B2c),
            "b2b" => Ok(Self::B2b),
            "both" => Ok(Self::Both),
            _ => Err(format!("invalid platform: {s} (expected b2c, b2b or both)")),
        }
    }
}

/// Result ordering.
///
/// `Relevance` preserves upstream order; the other keys are applied
/// locally to the fetched page (and to the merged sequence when both
/// platforms are queried). Name ordering compares diacritic-folded
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortBy {
    /// Parse a sort key; unknown values fall back to `Relevance` rather
    /// than failing.
    #[must_use]
    pub fn parse_or_relevance(s: &str) -> Self {
        match s {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            _ => Self::Relevance,
        }
    }
}

/// A caller-facing search request with platform defaults pre-filled.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub term: String,
    pub scope: PlatformScope,
    /// 1-based page number.
    pub page: u32,
    /// Requested page size; values above the platform maximum are
    /// clamped before they reach the wire.
    pub page_size: u32,
    pub sort_by: SortBy,
}

impl SearchRequest {
    /// A request for `term` with the platform defaults: B2C only,
    /// first page, 24 items, relevance order.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            scope: PlatformScope::B2c,
            page: 1,
            page_size: 24,
            sort_by: SortBy::Relevance,
        }
    }
}

/// A non-fatal per-platform failure attached to a degraded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformWarning {
    pub platform: Platform,
    pub message: String,
}

/// An ordered sequence of products plus pagination data and any
/// per-platform warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub products: Vec<Product>,
    /// Sum of the reporting platforms' upstream totals; when one side
    /// degraded this covers the surviving side only.
    pub total_count: u32,
    /// Max page count across the reporting platforms.
    pub total_pages: u32,
    pub warnings: Vec<PlatformWarning>,
}

/// Build single-platform results: dedupe, sort, done.
#[must_use]
pub fn single_results(page: NormalizedPage, sort_by: SortBy) -> SearchResults {
    let mut products = dedupe_products(page.products);
    sort_products(&mut products, sort_by);
    SearchResults {
        products,
        total_count: page.total_count,
        total_pages: page.total_pages,
        warnings: Vec::new(),
    }
}

/// Merge the two sides of a dual-platform search.
///
/// One failing side degrades to a warning; both failing propagates the
/// retail error. Successful sides are concatenated retail-first before
/// the merged sort, so `Relevance` keeps B2C items ahead of B2B items.
pub fn merge_sides(
    b2c: Result<NormalizedPage>,
    b2b: Result<NormalizedPage>,
    sort_by: SortBy,
) -> Result<SearchResults> {
    let (b2c, b2b) = match (b2c, b2b) {
        (Err(retail_err), Err(wholesale_err)) => {
            tracing::warn!(error = %wholesale_err, "wholesale side also failed");
            return Err(retail_err);
        }
        (b2c, b2b) => (b2c, b2b),
    };

    let mut results = SearchResults::default();
    let mut products = Vec::new();

    match b2c {
        Ok(page) => {
            results.total_count += page.total_count;
            results.total_pages = results.total_pages.max(page.total_pages);
            products.extend(page.products);
        }
        Err(err) => results.warnings.push(PlatformWarning {
            platform: Platform::B2c,
            message: err.to_string(),
        }),
    }
    match b2b {
        Ok(page) => {
            results.total_count += page.total_count;
            results.total_pages = results.total_pages.max(page.total_pages);
            products.extend(page.products);
        }
        Err(err) => results.warnings.push(PlatformWarning {
            platform: Platform::B2b,
            message: err.to_string(),
        }),
    }

    let mut products = dedupe_products(products);
    sort_products(&mut products, sort_by);
    results.products = products;
    Ok(results)
}

/// Drop duplicate (platform, sku) pairs, first occurrence wins.
#[must_use]
pub fn dedupe_products(products: Vec<Product>) -> Vec<Product> {
    let mut seen: HashSet<(Platform, String)> = HashSet::with_capacity(products.len());
    products
        .into_iter()
        .filter(|p| seen.insert((p.platform, p.sku.clone())))
        .collect()
}

/// Apply a sort order in place. `Relevance` preserves the existing
/// order; all sorts are stable.
pub fn sort_products(products: &mut [Product], sort_by: SortBy) {
    match sort_by {
        SortBy::Relevance => {}
        SortBy::PriceAsc => products.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
        SortBy::PriceDesc => products.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
        SortBy::NameAsc => products.sort_by_key(|p| sort_name(&p.name)),
        SortBy::NameDesc => {
            products.sort_by_key(|p| std::cmp::Reverse(sort_name(&p.name)));
        }
    }
}

fn sort_name(name: &str) -> String {
    text::fold_diacritics(&name.to_lowercase())
}
