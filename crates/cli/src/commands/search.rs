//! Search, detail lookup and export commands.

use mm_catalog_core::Platform;
use mm_catalog_engine::{Catalog, CatalogError, PlatformScope, Result, SearchRequest, SortBy};
use tracing::{info, warn};

/// Run a search against one or both platforms and print the results.
pub async fn search(
    catalog: &Catalog,
    term: &str,
    platform: &str,
    page: u32,
    page_size: u32,
    sort: &str,
) -> Result<()> {
    let scope: PlatformScope = platform.parse().map_err(CatalogError::Validation)?;

    let mut request = SearchRequest::new(term);
    request.scope = scope;
    request.page = page;
    request.page_size = page_size;
    request.sort_by = SortBy::parse_or_relevance(sort);

    let results = catalog.search_products(request).await?;

    for warning in &results.warnings {
        warn!(platform = %warning.platform, "{}", warning.message);
    }

    info!(
        "{} result(s) on this page, {} total across {} page(s)",
        results.products.len(),
        results.total_count,
        results.total_pages
    );
    for product in &results.products {
        info!(
            "  [{}] {} | {} | {} | {}",
            product.platform, product.sku, product.name, product.price, product.stock_status
        );
    }

    Ok(())
}

/// Look up a single product by exact SKU and print every field worth
/// seeing on a terminal.
pub async fn details(catalog: &Catalog, sku: &str, platform: &str) -> Result<()> {
    let platform: Platform = platform
        .parse()
        .map_err(|e: String| CatalogError::Validation(e))?;

    let product = catalog.product_details(sku, platform).await?;

    info!("SKU:      {}", product.sku);
    info!("Name:     {}", product.name);
    info!("Platform: {}", product.platform);
    info!("Price:    {}", product.price);
    if product.has_discount() {
        info!(
            "Regular:  {} (saves {})",
            product.regular_price,
            product.discount_amount()
        );
    }
    if !product.unit.is_empty() {
        info!("Unit:     {}", product.unit);
    }
    info!("Stock:    {}", product.stock_status);
    if let Some(rating) = product.rating {
        info!("Rating:   {rating:.1}");
    }
    if !product.categories.is_empty() {
        info!("Categories: {}", product.categories.join(", "));
    }
    if !product.product_url.is_empty() {
        info!("URL:      {}", product.product_url);
    }

    Ok(())
}

/// Walk every result page for a term and emit the products as a JSON
/// array on stdout. Progress goes to the log, data to stdout, so the
/// output can be piped.
#[allow(clippy::print_stdout)]
pub async fn export(
    catalog: &Catalog,
    term: &str,
    platform: &str,
    max_pages: Option<u32>,
) -> Result<()> {
    let platform: Platform = platform
        .parse()
        .map_err(|e: String| CatalogError::Validation(e))?;

    let products = catalog.search_all_pages(term, platform, max_pages).await?;
    info!("exported {} product(s)", products.len());

    let json = serde_json::to_string_pretty(&products)
        .map_err(|e| CatalogError::MalformedData(e.to_string()))?;
    println!("{json}");

    Ok(())
}
