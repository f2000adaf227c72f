//! Subcommand implementations.

pub mod compare;
pub mod search;
pub mod session;
pub mod stores;
