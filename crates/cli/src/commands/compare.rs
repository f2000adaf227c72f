//! Price comparison command.

use mm_catalog_engine::{Catalog, Result};
use tracing::{info, warn};

/// Compare retail and wholesale prices for a term and print the paired
/// records followed by the aggregate summary.
pub async fn compare(catalog: &Catalog, term: &str, max_results: u32) -> Result<()> {
    let report = catalog.compare_prices(term, max_results).await?;

    for warning in &report.warnings {
        warn!(platform = %warning.platform, "{}", warning.message);
    }

    if report.records.is_empty() {
        info!("no products found for \"{term}\"");
        return Ok(());
    }

    for record in &report.records {
        match (&record.b2c_product, &record.b2b_product) {
            (Some(b2c), Some(b2b)) => {
                let pct = record
                    .price_delta_pct
                    .map_or_else(String::new, |p| format!(" ({p}%)"));
                info!(
                    "  {} | retail {} vs wholesale {}{pct}",
                    b2c.name, b2c.price, b2b.price
                );
            }
            (Some(b2c), None) => {
                info!("  {} | retail only at {}", b2c.name, b2c.price);
            }
            (None, Some(b2b)) => {
                info!("  {} | wholesale only at {}", b2b.name, b2b.price);
            }
            (None, None) => {}
        }
    }

    let summary = &report.summary;
    info!(
        "{} matched, {} cheaper on wholesale, total potential savings {}",
        summary.matched,
        summary.cheaper_on_wholesale,
        mm_catalog_core::Price::new(summary.total_savings, mm_catalog_core::CurrencyCode::Vnd)
    );
    if let Some(avg) = summary.average_savings_pct {
        info!("average wholesale savings: {avg}%");
    }

    Ok(())
}
