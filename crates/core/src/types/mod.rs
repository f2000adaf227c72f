//! Canonical types for the MM Catalog engine.
//!
//! Both upstream platforms are mapped into these shapes by the engine's
//! normalizer; nothing platform-specific leaks past this module.

pub mod comparison;
pub mod email;
pub mod platform;
pub mod price;
pub mod product;
pub mod store;

pub use comparison::{ComparisonRecord, ComparisonSummary};
pub use email::{Email, EmailError};
pub use platform::Platform;
pub use price::{CurrencyCode, Price};
pub use product::{Product, StockStatus};
pub use store::{Store, StoreRegion};
