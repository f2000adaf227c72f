//! Magento GraphQL clients for the two Mega Market platforms.
//!
//! # Architecture
//!
//! - Queries go out as HTTP GET with `query`, `operationName` and
//!   JSON-encoded `variables` parameters, matching observed production
//!   traffic; mutations (token issue/revoke) go out as HTTP POST.
//! - Every request carries a `store` header scoping it to the active
//!   store and a browser-like User-Agent (the wholesale platform rejects
//!   non-browser agents with 403).
//! - Hand-written GraphQL documents parsed into serde structs; Magento
//!   publishes no schema file for these endpoints, so there is no codegen.
//! - Per-client rate limiting (`governor`) and bounded retry with
//!   exponential backoff for transient failures only.

pub mod auth;
pub mod queries;
pub mod response;
pub mod retail;
mod transport;
pub mod wholesale;

pub use retail::RetailClient;
pub use wholesale::WholesaleClient;

use serde::Deserialize;
use thiserror::Error;

/// Hard per-page cap enforced by both platforms.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Clamp a requested page size to the platform maximum.
///
/// Oversized values are capped, not rejected.
#[must_use]
pub const fn clamp_page_size(page_size: u32) -> u32 {
    if page_size > MAX_PAGE_SIZE {
        MAX_PAGE_SIZE
    } else {
        page_size
    }
}

/// Errors raised by the Magento clients.
///
/// `Transient` and `RateLimited` are safe to retry; everything else
/// propagates immediately.
#[derive(Debug, Error)]
pub enum MagentoError {
    /// Timeout, connection failure, HTTP 5xx. Retryable.
    #[error("transient upstream failure: {0}")]
    Transient(String),

    /// Non-retryable HTTP failure (4xx other than 429).
    #[error("upstream rejected the request (HTTP {status}): {message}")]
    Permanent { status: u16, message: String },

    /// GraphQL-level errors in an otherwise successful response.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP 429 with the advertised retry delay in seconds.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl MagentoError {
    /// True when a bounded retry is worthwhile.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::RateLimited(_))
    }
}

/// A GraphQL error returned by a Magento endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Magento extension data; `category` distinguishes authentication
    /// failures (`graphql-authentication`) from authorization failures
    /// (`graphql-authorization`).
    #[serde(default)]
    pub extensions: GraphQLExtensions,
}

/// Magento `extensions` payload on a GraphQL error.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GraphQLExtensions {
    pub category: Option<String>,
}

impl GraphQLError {
    /// The Magento error category, when present.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.extensions.category.as_deref()
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .map(|e| {
            e.category().map_or_else(
                || e.message.clone(),
                |category| format!("{} [{category}]", e.message),
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_size() {
        assert_eq!(clamp_page_size(24), 24);
        assert_eq!(clamp_page_size(50), 50);
        assert_eq!(clamp_page_size(51), 50);
        assert_eq!(clamp_page_size(500), 50);
        assert_eq!(clamp_page_size(0), 0);
    }

    #[test]
    fn test_transient_classification() {
        assert!(MagentoError::Transient("timeout".to_string()).is_transient());
        assert!(MagentoError::RateLimited(5).is_transient());
        assert!(
            !MagentoError::Permanent {
                status: 400,
                message: "bad request".to_string()
            }
            .is_transient()
        );
        assert!(!MagentoError::NotFound("sku".to_string()).is_transient());
        assert!(!MagentoError::GraphQL(vec![]).is_transient());
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "The current customer isn't authorized.".to_string(),
                extensions: GraphQLExtensions {
                    category: Some("graphql-authorization".to_string()),
                },
            },
            GraphQLError {
                message: "Field not found".to_string(),
                extensions: GraphQLExtensions::default(),
            },
        ];
        let err = MagentoError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: The current customer isn't authorized. [graphql-authorization]; \
             Field not found"
        );
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = MagentoError::GraphQL(vec![]);
        assert_eq!(err.to_string(), "GraphQL errors: (no error details provided)");
    }

    #[test]
    fn test_graphql_error_deserializes_without_extensions() {
        let err: GraphQLError =
            serde_json::from_str(r#"{"message": "boom"}"#).expect("valid error json");
        assert_eq!(err.message, "boom");
        assert_eq!(err.category(), None);
    }
}
