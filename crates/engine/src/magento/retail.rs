//! Retail (B2C) platform client.
//!
//! Unauthenticated access; search pages are cached briefly since retail
//! pricing is identical for every caller.

use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::magento::response::{RawProduct, RawSearchPage, SearchData};
use crate::magento::transport::Transport;
use crate::magento::{MagentoError, clamp_page_size, queries};

/// Page size used when resolving a single SKU through search.
const DETAIL_PAGE_SIZE: u32 = 10;

/// Client for the public retail platform.
pub struct RetailClient {
    transport: Transport,
    cache: Cache<String, RawSearchPage>,
}

impl RetailClient {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            transport: Transport::new(config.b2c_endpoint.clone(), config),
            cache,
        }
    }

    /// Search the retail catalog.
    ///
    /// `page_size` above the platform maximum is clamped, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `MagentoError` when the request fails after retries.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search(
        &self,
        term: &str,
        page: u32,
        page_size: u32,
        store_code: &str,
    ) -> Result<RawSearchPage, MagentoError> {
        let page_size = clamp_page_size(page_size);
        let cache_key = format!("{store_code}:{term}:{page}:{page_size}");

        if let Some(hit) = self.cache.get(&cache_key).await {
            debug!("cache hit for retail search page");
            return Ok(hit);
        }

        let variables = serde_json::json!({
            "currentPage": page,
            "pageSize": page_size,
            "inputText": term,
        });

        let data = self
            .transport
            .query(
                queries::PRODUCT_SEARCH_OP,
                queries::PRODUCT_SEARCH,
                &variables,
                store_code,
                None,
            )
            .await?;
        let data: SearchData = serde_json::from_value(data)?;

        self.cache.insert(cache_key, data.products.clone()).await;

        Ok(data.products)
    }

    /// Resolve a single product by exact SKU.
    ///
    /// Searches by the SKU term and requires an exact match among the
    /// returned items; a near miss is `NotFound`, never a first-hit
    /// fallback.
    ///
    /// # Errors
    ///
    /// `MagentoError::NotFound` for an unknown SKU; other variants when
    /// the request fails.
    #[instrument(skip(self))]
    pub async fn product_by_sku(
        &self,
        sku: &str,
        store_code: &str,
    ) -> Result<RawProduct, MagentoError> {
        let page = self.search(sku, 1, DETAIL_PAGE_SIZE, store_code).await?;
        page.items
            .into_iter()
            .find(|item| item.sku.as_deref() == Some(sku))
            .ok_or_else(|| MagentoError::NotFound(format!("sku {sku}")))
    }
}
