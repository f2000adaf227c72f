//! Store listing command.

use mm_catalog_engine::{Catalog, CatalogError, RegionFilter, Result};
use tracing::info;

/// List known stores, optionally filtered by region.
pub fn list(catalog: &Catalog, region: &str) -> Result<()> {
    let filter: RegionFilter = region.parse().map_err(CatalogError::Validation)?;

    let stores = catalog.list_stores(filter);
    info!("{} store(s)", stores.len());
    for store in &stores {
        info!("  {} | {} | {} | {}", store.code, store.name, store.region, store.address);
    }

    Ok(())
}
