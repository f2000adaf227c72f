//! Wholesale authentication types.
//!
//! The wholesale platform issues opaque bearer tokens via the
//! `generateCustomerToken` mutation. Magento does not report a lifetime,
//! so expiry is derived client-side from the configured TTL and checked
//! lazily on read.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::magento::MagentoError;

/// Safety margin applied to expiry checks so a token is never presented
/// within its final seconds of validity.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Wholesale authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token held. Raised before any network call is attempted.
    #[error(
        "not authenticated with the wholesale platform; run authenticate_b2b \
         (or set MMPRO_USERNAME/MMPRO_PASSWORD) first"
    )]
    NotAuthenticated,

    /// The platform rejected the supplied credentials.
    #[error("wholesale platform rejected the credentials")]
    InvalidCredentials,

    /// The held token has expired, locally or server-side.
    #[error("wholesale session expired; re-authenticate with authenticate_b2b")]
    Expired,

    /// The underlying request failed for non-auth reasons.
    #[error("wholesale request failed: {0}")]
    Upstream(#[from] MagentoError),
}

/// An issued wholesale customer token. Owned by the session, never
/// persisted outside process memory.
#[derive(Clone)]
pub struct AuthToken {
    token: SecretString,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Wrap a freshly issued token, deriving expiry from `ttl_secs`.
    #[must_use]
    pub fn new(token: SecretString, ttl_secs: u64) -> Self {
        let issued_at = Utc::now();
        Self::with_expiry(token, issued_at, issued_at + ttl(ttl_secs))
    }

    /// Wrap a token with explicit timestamps.
    #[must_use]
    pub const fn with_expiry(
        token: SecretString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            issued_at,
            expires_at,
        }
    }

    /// Lazy expiry check with a 60-second safety buffer.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() + TimeDelta::seconds(EXPIRY_BUFFER_SECS) >= self.expires_at
    }

    /// The opaque bearer token.
    #[must_use]
    pub const fn secret(&self) -> &SecretString {
        &self.token
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

fn ttl(ttl_secs: u64) -> TimeDelta {
    TimeDelta::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX))
}

/// Caller-facing authentication summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    /// Expiry of the held token; also reported for an already-expired
    /// token so callers can see why `authenticated` is false.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Profile of the authenticated wholesale customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomerProfile {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_not_expired() {
        let token = AuthToken::new(SecretString::from("opaque"), 3600);
        assert!(!token.is_expired());
        assert!(token.expires_at > token.issued_at);
    }

    #[test]
    fn test_past_expiry_reports_expired() {
        let now = Utc::now();
        let token = AuthToken::with_expiry(
            SecretString::from("opaque"),
            now - TimeDelta::hours(2),
            now - TimeDelta::hours(1),
        );
        assert!(token.is_expired());
    }

    #[test]
    fn test_expiry_buffer_is_honored() {
        // 30s of validity left is inside the 60s buffer
        let now = Utc::now();
        let token = AuthToken::with_expiry(
            SecretString::from("opaque"),
            now - TimeDelta::seconds(3570),
            now + TimeDelta::seconds(30),
        );
        assert!(token.is_expired());
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = AuthToken::new(SecretString::from("super-secret-token"), 3600);
        let debug_output = format!("{token:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_not_authenticated_display_carries_hint() {
        let msg = AuthError::NotAuthenticated.to_string();
        assert!(msg.contains("authenticate_b2b"));
    }
}
