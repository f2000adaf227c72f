//! MM Catalog Engine - cross-platform query and price comparison.
//!
//! Queries the two MM Mega Market backends - the public retail platform
//! (online.mmvietnam.com) and the authenticated wholesale platform
//! (mmpro.vn) - and normalizes their Magento GraphQL responses into one
//! canonical product model so callers can search both sides, compare
//! prices and keep a store-scoped session.
//!
//! # Architecture
//!
//! - [`magento`] - thin typed clients for the two GraphQL endpoints with
//!   retry, rate limiting and a shared error taxonomy
//! - [`session`] - process-scoped store selection and wholesale auth
//! - [`normalize`] - raw Magento records into [`mm_catalog_core::Product`]
//! - [`search`] - fan-out, merge and sort across one or both platforms
//! - [`compare`] - fuzzy name/unit matching and price-delta records
//! - [`Catalog`] - the operation facade tying it all together
//!
//! # Example
//!
//! ```rust,ignore
//! use mm_catalog_engine::{Catalog, Config, SearchRequest};
//!
//! let catalog = Catalog::new(Config::from_env()?);
//! catalog.bootstrap().await;
//!
//! let results = catalog
//!     .search_products(SearchRequest::new("gạo"))
//!     .await?;
//! for product in &results.products {
//!     println!("{} - {}", product.name, product.price);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod magento;
pub mod normalize;
pub mod search;
pub mod session;
pub mod stores;
pub mod text;

pub use catalog::Catalog;
pub use compare::{ComparisonReport, MIN_NAME_SIMILARITY};
pub use config::{Config, ConfigError};
pub use error::{CatalogError, Result};
pub use magento::auth::{AuthError, AuthStatus, AuthToken, CustomerProfile};
pub use magento::MagentoError;
pub use search::{PlatformScope, PlatformWarning, SearchRequest, SearchResults, SortBy};
pub use session::{Session, SessionSnapshot};
pub use stores::RegionFilter;
