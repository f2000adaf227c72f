//! The operation facade tying clients, session, normalizer, search and
//! comparison together.
//!
//! `Catalog` is cheaply cloneable; all clones share the two upstream
//! clients and the session. Every orchestrated operation runs under the
//! configured caller-level timeout so a stalled upstream cannot hang a
//! caller indefinitely.

use std::future::Future;
use std::sync::Arc;

use mm_catalog_core::{Email, Platform, Product, Store};
use secrecy::ExposeSecret;
use tracing::{info, instrument, warn};

use crate::compare::{self, ComparisonReport};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::magento::auth::{AuthStatus, AuthToken, CustomerProfile};
use crate::magento::{MAX_PAGE_SIZE, MagentoError, RetailClient, WholesaleClient};
use crate::normalize::{self, NormalizedPage};
use crate::search::{self, PlatformScope, PlatformWarning, SearchRequest, SearchResults};
use crate::session::{Session, SessionSnapshot};
use crate::stores::{self, RegionFilter};

/// The engine's operation facade.
///
/// Holds both platform clients and the session behind an `Arc`; clone
/// freely.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    retail: RetailClient,
    wholesale: WholesaleClient,
    session: Session,
}

impl Catalog {
    /// Build a catalog from configuration. No network traffic happens
    /// here; see [`Catalog::bootstrap`] for startup authentication.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let retail = RetailClient::new(&config);
        let wholesale = WholesaleClient::new(&config);
        Self {
            inner: Arc::new(Inner {
                config,
                retail,
                wholesale,
                session: Session::new(),
            }),
        }
    }

    /// Consume startup credentials from the configuration.
    ///
    /// A pre-issued customer token is adopted directly with a derived
    /// expiry. Otherwise, configured username/password credentials get
    /// one authentication attempt; failure is logged and the session
    /// stays unauthenticated rather than aborting startup.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) {
        let config = &self.inner.config;

        if let Some(token) = config.customer_token.clone() {
            self.inner
                .session
                .adopt_token(AuthToken::new(token, config.token_ttl_secs))
                .await;
            info!("adopted pre-issued wholesale token");
            return;
        }

        let Some(credentials) = &config.credentials else {
            return;
        };

        let store = self.inner.session.snapshot().await.b2b_store_code();
        match self
            .inner
            .wholesale
            .authenticate(
                &credentials.username,
                credentials.password.expose_secret(),
                &store,
            )
            .await
        {
            Ok(token) => {
                self.inner.session.adopt_token(token).await;
                info!(username = %credentials.username, "wholesale startup authentication succeeded");
            }
            Err(err) => {
                warn!(error = %err, "wholesale startup authentication failed, continuing unauthenticated");
            }
        }
    }

    /// Search one or both platforms.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty term or zero page/page size;
    /// `Auth` when a B2B-only search lacks a live token; upstream
    /// variants when the reporting side(s) fail.
    #[instrument(skip(self), fields(term = %request.term, scope = ?request.scope))]
    pub async fn search_products(&self, request: SearchRequest) -> Result<SearchResults> {
        validate_term(&request.term)?;
        if request.page == 0 {
            return Err(CatalogError::Validation("page must be >= 1".to_string()));
        }
        if request.page_size == 0 {
            return Err(CatalogError::Validation(
                "page_size must be >= 1".to_string(),
            ));
        }

        self.with_timeout(self.search_inner(request)).await
    }

    async fn search_inner(&self, request: SearchRequest) -> Result<SearchResults> {
        let snapshot = self.inner.session.snapshot().await;

        match request.scope {
            PlatformScope::B2c => {
                let page = self
                    .retail_page(&request.term, request.page, request.page_size, &snapshot)
                    .await?;
                Ok(search::single_results(page, request.sort_by))
            }
            PlatformScope::B2b => {
                let page = self
                    .wholesale_page(&request.term, request.page, request.page_size, &snapshot)
                    .await?;
                Ok(search::single_results(page, request.sort_by))
            }
            PlatformScope::Both => {
                let (b2c, b2b) = tokio::join!(
                    self.retail_page(&request.term, request.page, request.page_size, &snapshot),
                    self.wholesale_page(&request.term, request.page, request.page_size, &snapshot),
                );
                search::merge_sides(b2c, b2b, request.sort_by)
            }
        }
    }

    /// Fetch comparable products from both platforms and pair them up.
    ///
    /// Both sides are queried concurrently with `max_results` items
    /// each (the clients clamp oversized fetches). A failing side
    /// degrades to empty plus a warning; both sides failing propagates
    /// the retail error. Records come back ordered by absolute delta
    /// percentage, capped at `max_results`.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty term or `max_results == 0`; `Auth`
    /// errors pass through as the degraded-wholesale warning unless the
    /// retail side also failed.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn compare_prices(&self, term: &str, max_results: u32) -> Result<ComparisonReport> {
        validate_term(term)?;
        if max_results == 0 {
            return Err(CatalogError::Validation(
                "max_results must be >= 1".to_string(),
            ));
        }

        self.with_timeout(self.compare_inner(term, max_results))
            .await
    }

    async fn compare_inner(&self, term: &str, max_results: u32) -> Result<ComparisonReport> {
        let snapshot = self.inner.session.snapshot().await;

        let (b2c, b2b) = tokio::join!(
            self.retail_page(term, 1, max_results, &snapshot),
            self.wholesale_page(term, 1, max_results, &snapshot),
        );

        let (b2c, b2b) = match (b2c, b2b) {
            (Err(retail_err), Err(wholesale_err)) => {
                warn!(error = %wholesale_err, "wholesale side also failed");
                return Err(retail_err);
            }
            (b2c, b2b) => (b2c, b2b),
        };

        let mut warnings = Vec::new();
        let b2c = side_or_warning(b2c, Platform::B2c, &mut warnings);
        let b2b = side_or_warning(b2b, Platform::B2b, &mut warnings);

        let mut records = compare::match_products(b2c, b2b);
        compare::order_records(&mut records);
        records.truncate(max_results as usize);
        let summary = compare::summarize(&records);

        Ok(ComparisonReport {
            records,
            summary,
            warnings,
        })
    }

    /// Resolve a single product by exact SKU on one platform.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown SKU, `Auth` for an unauthenticated
    /// B2B lookup, `Validation` for an empty SKU.
    #[instrument(skip(self))]
    pub async fn product_details(&self, sku: &str, platform: Platform) -> Result<Product> {
        if sku.trim().is_empty() {
            return Err(CatalogError::Validation("sku cannot be empty".to_string()));
        }

        self.with_timeout(self.details_inner(sku, platform)).await
    }

    async fn details_inner(&self, sku: &str, platform: Platform) -> Result<Product> {
        let snapshot = self.inner.session.snapshot().await;

        let raw = match platform {
            Platform::B2c => {
                self.inner
                    .retail
                    .product_by_sku(sku, &snapshot.b2c_store_code())
                    .await?
            }
            Platform::B2b => {
                let token = snapshot.b2b_token()?;
                self.inner
                    .wholesale
                    .product_by_sku(sku, &snapshot.b2b_store_code(), token)
                    .await?
            }
        };

        normalize::normalize_product(raw, platform, snapshot.store_code().as_deref())
    }

    /// Walk a single platform page by page at the maximum page size.
    ///
    /// Stops at the upstream-reported last page, the first empty page,
    /// or `max_pages`. Each page fetch runs under its own caller-level
    /// timeout.
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be fetched; earlier pages
    /// are discarded.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search_all_pages(
        &self,
        term: &str,
        platform: Platform,
        max_pages: Option<u32>,
    ) -> Result<Vec<Product>> {
        validate_term(term)?;

        let snapshot = self.inner.session.snapshot().await;
        let mut products = Vec::new();
        let mut page = 1u32;

        loop {
            if max_pages.is_some_and(|cap| page > cap) {
                break;
            }

            let normalized = match platform {
                Platform::B2c => {
                    self.with_timeout(self.retail_page(term, page, MAX_PAGE_SIZE, &snapshot))
                        .await?
                }
                Platform::B2b => {
                    self.with_timeout(self.wholesale_page(term, page, MAX_PAGE_SIZE, &snapshot))
                        .await?
                }
            };

            let was_empty = normalized.products.is_empty();
            let total_pages = normalized.total_pages;
            products.extend(normalized.products);

            if was_empty || page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(products)
    }

    /// Exchange wholesale credentials for a customer token and adopt it
    /// into the session.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed email or empty password;
    /// `Auth(InvalidCredentials)` when the platform rejects the pair.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn authenticate_b2b(&self, username: &str, password: &str) -> Result<AuthStatus> {
        let email =
            Email::parse(username).map_err(|err| CatalogError::Validation(err.to_string()))?;
        if password.is_empty() {
            return Err(CatalogError::Validation(
                "password cannot be empty".to_string(),
            ));
        }

        self.with_timeout(async {
            let store = self.inner.session.snapshot().await.b2b_store_code();
            let token = self
                .inner
                .wholesale
                .authenticate(email.as_str(), password, &store)
                .await?;
            self.inner.session.adopt_token(token).await;
            Ok(self.inner.session.auth_status().await)
        })
        .await
    }

    /// Drop the session token and revoke it server-side.
    ///
    /// Returns `true` when the session held a token. The local session
    /// is always cleared; a failed server-side revocation is logged and
    /// does not resurrect the token.
    #[instrument(skip(self))]
    pub async fn logout_b2b(&self) -> bool {
        let Some(token) = self.inner.session.take_token().await else {
            return false;
        };

        let store = self.inner.session.snapshot().await.b2b_store_code();
        match self.inner.wholesale.revoke_token(&store, &token).await {
            Ok(confirmed) => info!(confirmed, "wholesale token revoked"),
            Err(err) => warn!(error = %err, "server-side token revocation failed"),
        }

        true
    }

    /// Verify the session token against the platform by fetching the
    /// customer profile.
    ///
    /// A token the platform no longer accepts is dropped from the
    /// session before the error propagates.
    ///
    /// # Errors
    ///
    /// `Auth(NotAuthenticated)` without a token, `Auth(Expired)` when
    /// the token has lapsed locally or server-side.
    #[instrument(skip(self))]
    pub async fn verify_b2b(&self) -> Result<CustomerProfile> {
        self.with_timeout(async {
            let snapshot = self.inner.session.snapshot().await;
            let token = snapshot.b2b_token()?;

            match self
                .inner
                .wholesale
                .verify_token(&snapshot.b2b_store_code(), token)
                .await
            {
                Ok(profile) => Ok(profile),
                Err(err) => {
                    if matches!(err, crate::magento::auth::AuthError::Expired) {
                        drop(self.inner.session.take_token().await);
                    }
                    Err(err.into())
                }
            }
        })
        .await
    }

    /// Current authentication state, without network traffic.
    pub async fn auth_status(&self) -> AuthStatus {
        self.inner.session.auth_status().await
    }

    /// Known stores, optionally filtered by region.
    #[must_use]
    pub fn list_stores(&self, filter: RegionFilter) -> Vec<Store> {
        stores::by_region(filter)
    }

    /// Select the active store for subsequent operations.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown code; the previous selection survives.
    #[instrument(skip(self))]
    pub async fn set_store(&self, code: &str) -> Result<Store> {
        self.inner.session.set_store(code).await
    }

    /// The currently selected store, if any.
    pub async fn current_store(&self) -> Option<Store> {
        self.inner.session.current_store().await
    }

    async fn retail_page(
        &self,
        term: &str,
        page: u32,
        page_size: u32,
        snapshot: &SessionSnapshot,
    ) -> Result<NormalizedPage> {
        let raw = self
            .inner
            .retail
            .search(term, page, page_size, &snapshot.b2c_store_code())
            .await?;
        Ok(normalize::normalize_page(
            raw,
            Platform::B2c,
            snapshot.store_code().as_deref(),
        ))
    }

    async fn wholesale_page(
        &self,
        term: &str,
        page: u32,
        page_size: u32,
        snapshot: &SessionSnapshot,
    ) -> Result<NormalizedPage> {
        let token = snapshot.b2b_token()?;
        let raw = self
            .inner
            .wholesale
            .search(term, page, page_size, &snapshot.b2b_store_code(), token)
            .await?;
        Ok(normalize::normalize_page(
            raw,
            Platform::B2b,
            snapshot.store_code().as_deref(),
        ))
    }

    async fn with_timeout<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let limit = self.inner.config.request_timeout;
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Upstream(MagentoError::Transient(format!(
                "operation exceeded the {}s request timeout",
                limit.as_secs()
            )))),
        }
    }
}

fn validate_term(term: &str) -> Result<()> {
    if term.trim().is_empty() {
        return Err(CatalogError::Validation(
            "search term cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn side_or_warning(
    side: Result<NormalizedPage>,
    platform: Platform,
    warnings: &mut Vec<PlatformWarning>,
) -> Vec<Product> {
    match side {
        Ok(page) => page.products,
        Err(err) => {
            warn!(%platform, error = %err, "comparison side degraded");
            warnings.push(PlatformWarning {
                platform,
                message: err.to_string(),
            });
            Vec::new()
        }
    }
}
