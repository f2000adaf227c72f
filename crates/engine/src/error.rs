//! Unified error type for catalog operations.
//!
//! All facade operations return [`Result`]. Upstream `NotFound` is
//! lifted into its own variant on conversion so callers can distinguish
//! a missing product from a failing platform.

use thiserror::Error;

use crate::magento::MagentoError;
use crate::magento::auth::AuthError;

/// Caller-facing error for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An upstream platform call failed.
    #[error("upstream error: {0}")]
    Upstream(MagentoError),

    /// Wholesale authentication failed or is missing.
    #[error(transparent)]
    Auth(AuthError),

    /// Unknown SKU or store code.
    #[error("not found: {0}")]
    NotFound(String),

    /// An upstream record could not be normalized.
    #[error("malformed upstream record: {0}")]
    MalformedData(String),

    /// Invalid caller parameters.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl From<MagentoError> for CatalogError {
    fn from(err: MagentoError) -> Self {
        match err {
            MagentoError::NotFound(what) => Self::NotFound(what),
            other => Self::Upstream(other),
        }
    }
}

impl From<AuthError> for CatalogError {
    fn from(err: AuthError) -> Self {
        match err {
            // Non-auth failures on the wholesale client arrive wrapped;
            // unwrap them so NotFound is lifted here too.
            AuthError::Upstream(upstream) => upstream.into(),
            other => Self::Auth(other),
        }
    }
}

/// Result type alias for `CatalogError`.
pub type Result<T> = std::result::Result<T, CatalogError>;
