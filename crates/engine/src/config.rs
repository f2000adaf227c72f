//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults target the production endpoints.
//!
//! - `MMPRO_USERNAME` / `MMPRO_PASSWORD` - wholesale account credentials,
//!   used to pre-authenticate at startup (must be set together)
//! - `MMPRO_CUSTOMER_TOKEN` - pre-issued wholesale customer token,
//!   adopted directly instead of authenticating
//! - `MM_B2C_ENDPOINT` - retail GraphQL URL (default: online.mmvietnam.com)
//! - `MM_B2B_ENDPOINT` - wholesale GraphQL URL (default: mmpro.vn)
//! - `MM_TIMEOUT_SECS` - per-request HTTP timeout (default: 30)
//! - `MM_RETRY_ATTEMPTS` - transient-retry attempt cap (default: 3)
//! - `MM_RATE_LIMIT_RPS` - upstream requests/second per client (default: 1)
//! - `MM_REQUEST_TIMEOUT_SECS` - caller-level operation timeout (default: 120)
//! - `MM_TOKEN_TTL_SECS` - derived customer-token lifetime (default: 3600)
//! - `MM_USER_AGENT` - User-Agent header sent on every request

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default retail GraphQL endpoint.
pub const DEFAULT_B2C_ENDPOINT: &str = "https://online.mmvietnam.com/graphql";
/// Default wholesale GraphQL endpoint.
pub const DEFAULT_B2B_ENDPOINT: &str = "https://mmpro.vn/graphql";
/// The wholesale platform returns 403 to non-browser agents, so the
/// default mimics a desktop Chrome.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Wholesale account credentials for startup authentication.
#[derive(Debug, Clone)]
pub struct WholesaleCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Retail (B2C) GraphQL endpoint.
    pub b2c_endpoint: String,
    /// Wholesale (B2B) GraphQL endpoint.
    pub b2b_endpoint: String,
    /// Wholesale credentials for startup authentication, if configured.
    pub credentials: Option<WholesaleCredentials>,
    /// Pre-issued wholesale customer token, if configured.
    pub customer_token: Option<SecretString>,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Transient-retry attempt cap (total attempts, not extra retries).
    pub retry_attempts: u32,
    /// Upstream requests per second, per client.
    pub rate_limit_rps: u32,
    /// Caller-level timeout covering a whole orchestrated operation.
    pub request_timeout: Duration,
    /// Lifetime assumed for freshly issued customer tokens. Magento does
    /// not report one, so expiry is derived client-side.
    pub token_ttl_secs: u64,
    /// User-Agent header sent on every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            b2c_endpoint: DEFAULT_B2C_ENDPOINT.to_string(),
            b2b_endpoint: DEFAULT_B2B_ENDPOINT.to_string(),
            credentials: None,
            customer_token: None,
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            rate_limit_rps: 1,
            request_timeout: Duration::from_secs(120),
            token_ttl_secs: 3600,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse, an endpoint is
    /// not a valid URL, or only one half of the credential pair is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let b2c_endpoint = get_endpoint("MM_B2C_ENDPOINT", DEFAULT_B2C_ENDPOINT)?;
        let b2b_endpoint = get_endpoint("MM_B2B_ENDPOINT", DEFAULT_B2B_ENDPOINT)?;

        let credentials = credentials_from(
            get_optional_env("MMPRO_USERNAME"),
            get_optional_env("MMPRO_PASSWORD"),
        )?;
        let customer_token = get_optional_env("MMPRO_CUSTOMER_TOKEN").map(SecretString::from);

        Ok(Self {
            b2c_endpoint,
            b2b_endpoint,
            credentials,
            customer_token,
            timeout: Duration::from_secs(get_parsed("MM_TIMEOUT_SECS", 30)?),
            retry_attempts: get_parsed("MM_RETRY_ATTEMPTS", 3)?,
            rate_limit_rps: get_parsed("MM_RATE_LIMIT_RPS", 1)?,
            request_timeout: Duration::from_secs(get_parsed("MM_REQUEST_TIMEOUT_SECS", 120)?),
            token_ttl_secs: get_parsed("MM_TOKEN_TTL_SECS", 3600)?,
            user_agent: get_env_or_default("MM_USER_AGENT", DEFAULT_USER_AGENT),
        })
    }
}

/// Pair up optional username/password values.
///
/// A username without a password (or vice versa) is a configuration
/// mistake and is rejected rather than silently ignored.
fn credentials_from(
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<WholesaleCredentials>, ConfigError> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(WholesaleCredentials {
            username,
            password: SecretString::from(password),
        })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::InvalidEnvVar(
            "MMPRO_PASSWORD".to_string(),
            "MMPRO_USERNAME is set but MMPRO_PASSWORD is not".to_string(),
        )),
        (None, Some(_)) => Err(ConfigError::InvalidEnvVar(
            "MMPRO_USERNAME".to_string(),
            "MMPRO_PASSWORD is set but MMPRO_USERNAME is not".to_string(),
        )),
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable parsed as an integer, with a default.
fn get_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Get an endpoint variable, validating it parses as a URL.
fn get_endpoint(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.b2c_endpoint, DEFAULT_B2C_ENDPOINT);
        assert_eq!(config.b2b_endpoint, DEFAULT_B2B_ENDPOINT);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.rate_limit_rps, 1);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert!(config.credentials.is_none());
        assert!(config.customer_token.is_none());
    }

    #[test]
    fn test_credentials_require_both_halves() {
        assert!(credentials_from(None, None).is_ok_and(|c| c.is_none()));
        assert!(
            credentials_from(Some("user@example.com".to_string()), Some("pw".to_string()))
                .is_ok_and(|c| c.is_some())
        );
        assert!(matches!(
            credentials_from(Some("user@example.com".to_string()), None),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            credentials_from(None, Some("pw".to_string())),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = WholesaleCredentials {
            username: "user@example.com".to_string(),
            password: SecretString::from("hunter2-secret"),
        };
        let debug_output = format!("{creds:?}");
        assert!(debug_output.contains("user@example.com"));
        assert!(!debug_output.contains("hunter2-secret"));
    }
}
