//! Process-scoped session state: active store and wholesale auth.
//!
//! Exactly one [`Session`] exists per running process. It is the only
//! mutable shared state in the engine; every operation takes a
//! [`SessionSnapshot`] at its start and never observes a store change or
//! re-authentication that lands mid-flight. Writes go through a single
//! `RwLock` (single-writer discipline).

use mm_catalog_core::Store;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::CatalogError;
use crate::magento::auth::{AuthError, AuthStatus, AuthToken};
use crate::stores;

/// Mutable per-process session state.
#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<SessionInner>,
}

#[derive(Debug, Default)]
struct SessionInner {
    active_store: Option<Store>,
    token: Option<AuthToken>,
}

impl Session {
    /// A fresh session: no store selected, unauthenticated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the active store, validating against the known store list.
    ///
    /// # Errors
    ///
    /// `CatalogError::NotFound` for an unknown code; prior selection is
    /// left untouched.
    pub async fn set_store(&self, code: &str) -> Result<Store, CatalogError> {
        let store = stores::find(code)
            .ok_or_else(|| CatalogError::NotFound(format!("store code {code}")))?
            .clone();

        self.inner.write().await.active_store = Some(store.clone());
        info!(code = %store.code, name = %store.name, "active store changed");
        Ok(store)
    }

    /// The currently selected store, if any.
    pub async fn current_store(&self) -> Option<Store> {
        self.inner.read().await.active_store.clone()
    }

    /// Authentication summary with a lazy expiry check: a token past its
    /// expiry reports unauthenticated without being cleared.
    pub async fn auth_status(&self) -> AuthStatus {
        let inner = self.inner.read().await;
        inner.token.as_ref().map_or(
            AuthStatus {
                authenticated: false,
                expires_at: None,
            },
            |token| AuthStatus {
                authenticated: !token.is_expired(),
                expires_at: Some(token.expires_at),
            },
        )
    }

    /// Store a freshly issued token, replacing any previous one.
    pub async fn adopt_token(&self, token: AuthToken) {
        self.inner.write().await.token = Some(token);
    }

    /// Remove and return the held token (used by logout).
    pub async fn take_token(&self) -> Option<AuthToken> {
        self.inner.write().await.token.take()
    }

    /// Capture the session values a request needs, at request start.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read().await;
        SessionSnapshot {
            active_store: inner.active_store.clone(),
            token: inner.token.clone(),
        }
    }
}

/// Immutable copy of the session taken at the start of a request.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    active_store: Option<Store>,
    token: Option<AuthToken>,
}

impl SessionSnapshot {
    /// The selected store, if any.
    #[must_use]
    pub const fn active_store(&self) -> Option<&Store> {
        self.active_store.as_ref()
    }

    /// Numeric code of the selected store.
    #[must_use]
    pub fn store_code(&self) -> Option<String> {
        self.active_store.as_ref().map(|s| s.code.clone())
    }

    /// Retail store code for this request, falling back to the platform
    /// default when no store is selected.
    #[must_use]
    pub fn b2c_store_code(&self) -> String {
        self.active_store
            .as_ref()
            .map_or_else(|| stores::DEFAULT_B2C_STORE.to_string(), Store::b2c_store_code)
    }

    /// Wholesale store code for this request.
    #[must_use]
    pub fn b2b_store_code(&self) -> String {
        self.active_store
            .as_ref()
            .map_or_else(|| stores::DEFAULT_B2B_STORE.to_string(), Store::b2b_store_code)
    }

    /// The wholesale token, failing fast before any network call when
    /// absent or expired.
    ///
    /// # Errors
    ///
    /// `AuthError::NotAuthenticated` when no token is held,
    /// `AuthError::Expired` when the held token is past its expiry.
    pub fn b2b_token(&self) -> Result<&AuthToken, AuthError> {
        match &self.token {
            None => Err(AuthError::NotAuthenticated),
            Some(token) if token.is_expired() => Err(AuthError::Expired),
            Some(token) => Ok(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use secrecy::SecretString;

    fn expired_token() -> AuthToken {
        let now = Utc::now();
        AuthToken::with_expiry(
            SecretString::from("opaque"),
            now - TimeDelta::hours(2),
            now - TimeDelta::hours(1),
        )
    }

    #[tokio::test]
    async fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.current_store().await.is_none());
        let status = session.auth_status().await;
        assert!(!status.authenticated);
        assert!(status.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_set_store_validates_code() {
        let session = Session::new();
        let store = session.set_store("mm_10015_vi").await.expect("known store");
        assert_eq!(store.code, "10015");
        assert_eq!(
            session.current_store().await.map(|s| s.code),
            Some("10015".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_store_unknown_leaves_state_untouched() {
        let session = Session::new();
        session.set_store("10010").await.expect("known store");

        let err = session.set_store("99999").await.expect_err("unknown store");
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert_eq!(
            session.current_store().await.map(|s| s.code),
            Some("10010".to_string())
        );
    }

    #[tokio::test]
    async fn test_auth_status_lazy_expiry() {
        let session = Session::new();
        session.adopt_token(expired_token()).await;

        let status = session.auth_status().await;
        assert!(!status.authenticated);
        // The stale expiry is still reported so callers can see why
        assert!(status.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_auth_status_live_token() {
        let session = Session::new();
        session
            .adopt_token(AuthToken::new(SecretString::from("opaque"), 3600))
            .await;

        let status = session.auth_status().await;
        assert!(status.authenticated);
        assert!(status.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_snapshot_store_codes_fall_back_to_defaults() {
        let session = Session::new();
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.b2c_store_code(), "b2c_10010_vi");
        assert_eq!(snapshot.b2b_store_code(), "mm_10010_vi");
        assert!(snapshot.store_code().is_none());

        session.set_store("10020").await.expect("known store");
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.b2c_store_code(), "b2c_10020_vi");
        assert_eq!(snapshot.b2b_store_code(), "mm_10020_vi");
        assert_eq!(snapshot.store_code(), Some("10020".to_string()));
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_later_writes() {
        let session = Session::new();
        session.set_store("10010").await.expect("known store");
        let snapshot = session.snapshot().await;

        session.set_store("10035").await.expect("known store");
        // The earlier snapshot still sees the store it was taken under
        assert_eq!(snapshot.store_code(), Some("10010".to_string()));
    }

    #[tokio::test]
    async fn test_b2b_token_fails_fast() {
        let session = Session::new();
        let snapshot = session.snapshot().await;
        assert!(matches!(
            snapshot.b2b_token(),
            Err(AuthError::NotAuthenticated)
        ));

        session.adopt_token(expired_token()).await;
        let snapshot = session.snapshot().await;
        assert!(matches!(snapshot.b2b_token(), Err(AuthError::Expired)));
    }

    #[tokio::test]
    async fn test_take_token() {
        let session = Session::new();
        assert!(session.take_token().await.is_none());

        session
            .adopt_token(AuthToken::new(SecretString::from("opaque"), 3600))
            .await;
        assert!(session.take_token().await.is_some());
        assert!(session.take_token().await.is_none());
    }
}
