//! MM Catalog Core - Shared types library.
//!
//! This crate provides the canonical product model shared across the
//! MM Catalog components:
//! - `engine` - Cross-platform query and price-comparison engine
//! - `cli` - Command-line front end (`mm-cli`)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! upstream wire formats. Both Mega Market platforms (retail and
//! wholesale) are normalized into the types defined here.
//!
//! # Modules
//!
//! - [`types`] - `Product`, `Price`, `Store`, `ComparisonRecord` and friends

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
