//! Wholesale (B2B) platform client.
//!
//! Every catalog call carries a customer token obtained from
//! [`WholesaleClient::authenticate`]. Responses are not cached because
//! wholesale pricing is account-scoped. Callers are expected to check
//! the session for a live token before reaching this client; the token
//! parameter on every method makes that hard to forget.

use secrecy::SecretString;
use tracing::instrument;

use crate::config::Config;
use crate::magento::auth::{AuthError, AuthToken, CustomerProfile};
use crate::magento::response::{
    CustomerData, RawProduct, RawSearchPage, SearchData, TokenData,
};
use crate::magento::transport::Transport;
use crate::magento::{GraphQLError, MagentoError, clamp_page_size, queries};

/// Page size used when resolving a single SKU through search.
const DETAIL_PAGE_SIZE: u32 = 10;

/// Client for the authenticated wholesale platform.
pub struct WholesaleClient {
    transport: Transport,
    token_ttl_secs: u64,
}

impl WholesaleClient {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            transport: Transport::new(config.b2b_endpoint.clone(), config),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    /// Search the wholesale catalog.
    ///
    /// # Errors
    ///
    /// `AuthError::Expired` when the platform no longer accepts the
    /// token; `AuthError::Upstream` for other failures.
    #[instrument(skip(self, token), fields(term = %term))]
    pub async fn search(
        &self,
        term: &str,
        page: u32,
        page_size: u32,
        store_code: &str,
        token: &AuthToken,
    ) -> Result<RawSearchPage, AuthError> {
        let page_size = clamp_page_size(page_size);
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
                Some(token.secret()),
            )
            .await
            .map_err(classify_authorization)?;
        let data: SearchData = serde_json::from_value(data).map_err(MagentoError::from)?;

        Ok(data.products)
    }

    /// Resolve a single product by exact SKU; same contract as the
    /// retail client's lookup.
    ///
    /// # Errors
    ///
    /// `AuthError::Upstream(MagentoError::NotFound)` for an unknown SKU.
    #[instrument(skip(self, token))]
    pub async fn product_by_sku(
        &self,
        sku: &str,
        store_code: &str,
        token: &AuthToken,
    ) -> Result<RawProduct, AuthError> {
        let page = self
            .search(sku, 1, DETAIL_PAGE_SIZE, store_code, token)
            .await?;
        page.items
            .into_iter()
            .find(|item| item.sku.as_deref() == Some(sku))
            .ok_or_else(|| AuthError::Upstream(MagentoError::NotFound(format!("sku {sku}"))))
    }

    /// Exchange credentials for a customer token.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` when the platform rejects the
    /// email/password pair; `AuthError::Upstream` otherwise.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        store_code: &str,
    ) -> Result<AuthToken, AuthError> {
        let variables = serde_json::json!({ "email": email, "password": password });

        let data = self
            .transport
            .mutate(
                queries::GENERATE_CUSTOMER_TOKEN_OP,
                queries::GENERATE_CUSTOMER_TOKEN,
                &variables,
                store_code,
                None,
            )
            .await
            .map_err(classify_authentication)?;
        let data: TokenData = serde_json::from_value(data).map_err(MagentoError::from)?;

        let token = data
            .generate_customer_token
            .and_then(|t| t.token)
            .ok_or_else(|| {
                AuthError::Upstream(MagentoError::GraphQL(vec![GraphQLError {
                    message: "authentication response carried no token".to_string(),
                    extensions: crate::magento::GraphQLExtensions::default(),
                }]))
            })?;

        Ok(AuthToken::new(SecretString::from(token), self.token_ttl_secs))
    }

    /// Revoke a customer token server-side.
    ///
    /// Returns whether the platform confirmed the revocation.
    ///
    /// # Errors
    ///
    /// `AuthError::Upstream` when the request fails.
    #[instrument(skip(self, token))]
    pub async fn revoke_token(
        &self,
        store_code: &str,
        token: &AuthToken,
    ) -> Result<bool, AuthError> {
        let data = self
            .transport
            .mutate(
                queries::REVOKE_CUSTOMER_TOKEN_OP,
                queries::REVOKE_CUSTOMER_TOKEN,
                &serde_json::json!({}),
                store_code,
                Some(token.secret()),
            )
            .await
            .map_err(classify_authorization)?;
        let data: crate::magento::response::RevokeData =
            serde_json::from_value(data).map_err(MagentoError::from)?;

        Ok(data.revoke_customer_token.is_some_and(|r| r.result))
    }

    /// Fetch the authenticated customer's profile; doubles as a live
    /// token check.
    ///
    /// # Errors
    ///
    /// `AuthError::Expired` when the token is no longer accepted.
    #[instrument(skip(self, token))]
    pub async fn verify_token(
        &self,
        store_code: &str,
        token: &AuthToken,
    ) -> Result<CustomerProfile, AuthError> {
        let data = self
            .transport
            .query(
                queries::CUSTOMER_PROFILE_OP,
                queries::CUSTOMER_PROFILE,
                &serde_json::json!({}),
                store_code,
                Some(token.secret()),
            )
            .await
            .map_err(classify_authorization)?;
        let data: CustomerData = serde_json::from_value(data).map_err(MagentoError::from)?;

        let customer = data.customer.ok_or(AuthError::Expired)?;
        Ok(CustomerProfile {
            email: customer.email.unwrap_or_default(),
            firstname: customer.firstname.unwrap_or_default(),
            lastname: customer.lastname.unwrap_or_default(),
        })
    }
}

/// Map GraphQL authorization failures (revoked or expired token
/// server-side) to `AuthError::Expired`.
fn classify_authorization(err: MagentoError) -> AuthError {
    if has_category(&err, "authorization") {
        AuthError::Expired
    } else {
        AuthError::Upstream(err)
    }
}

/// Map GraphQL authentication failures (bad credentials) to
/// `AuthError::InvalidCredentials`.
fn classify_authentication(err: MagentoError) -> AuthError {
    if has_category(&err, "authentication") {
        AuthError::InvalidCredentials
    } else {
        AuthError::Upstream(err)
    }
}

fn has_category(err: &MagentoError, needle: &str) -> bool {
    if let MagentoError::GraphQL(errors) = err {
        errors
            .iter()
            .any(|e| e.category().is_some_and(|c| c.contains(needle)))
    } else {
        false
    }
}
