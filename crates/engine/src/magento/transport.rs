//! Shared HTTP transport for the Magento clients.
//!
//! One transport per client so rate limits apply per platform. Queries
//! retry transient failures with exponential backoff; mutations are
//! never retried (re-sending a token issue/revoke is not idempotent
//! from the caller's point of view).

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::config::Config;
use crate::magento::{GraphQLError, MagentoError};

/// GraphQL-over-HTTP transport for one Magento endpoint.
pub struct Transport {
    http: reqwest::Client,
    endpoint: String,
    limiter: DefaultDirectRateLimiter,
    timeout: Duration,
    retry_attempts: u32,
    user_agent: String,
}

/// Envelope every Magento GraphQL response arrives in.
#[derive(serde::Deserialize)]
struct Envelope {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQLError>>,
}

impl Transport {
    pub fn new(endpoint: String, config: &Config) -> Self {
        let rps = NonZeroU32::new(config.rate_limit_rps).unwrap_or(NonZeroU32::MIN);
        Self {
            http: reqwest::Client::new(),
            endpoint,
            limiter: RateLimiter::direct(Quota::per_second(rps)),
            timeout: config.timeout,
            retry_attempts: config.retry_attempts.max(1),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Execute a query over GET, retrying transient failures.
    ///
    /// Returns the `data` payload; GraphQL-level errors become
    /// [`MagentoError::GraphQL`].
    pub async fn query(
        &self,
        operation: &str,
        document: &str,
        variables: &serde_json::Value,
        store_code: &str,
        token: Option<&SecretString>,
    ) -> Result<serde_json::Value, MagentoError> {
        let variables = serde_json::to_string(variables)?;
        let mut attempt: u32 = 0;
        loop {
            self.limiter.until_ready().await;
            debug!(operation, attempt, "executing Magento query");

            let result = self
                .query_once(operation, document, &variables, store_code, token)
                .await;

            match result {
                Ok(data) => return Ok(data),
                Err(err) if err.is_transient() && attempt + 1 < self.retry_attempts => {
                    let backoff = 1u64 << attempt;
                    let delay = match &err {
                        MagentoError::RateLimited(secs) => (*secs).max(backoff),
                        _ => backoff,
                    };
                    warn!(
                        operation,
                        attempt,
                        delay_secs = delay,
                        error = %err,
                        "transient upstream failure, retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(delay)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Execute a mutation over POST. Never retried.
    pub async fn mutate(
        &self,
        operation: &str,
        document: &str,
        variables: &serde_json::Value,
        store_code: &str,
        token: Option<&SecretString>,
    ) -> Result<serde_json::Value, MagentoError> {
        self.limiter.until_ready().await;
        debug!(operation, "executing Magento mutation");

        let body = serde_json::json!({
            "query": document,
            "operationName": operation,
            "variables": variables,
        });

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("store", store_code)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MagentoError::Transient(e.to_string()))?;
        Self::decode(response).await
    }

    async fn query_once(
        &self,
        operation: &str,
        document: &str,
        variables_json: &str,
        store_code: &str,
        token: Option<&SecretString>,
    ) -> Result<serde_json::Value, MagentoError> {
        let mut request = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("query", document),
                ("operationName", operation),
                ("variables", variables_json),
            ])
            .header("store", store_code)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .timeout(self.timeout);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MagentoError::Transient(e.to_string()))?;
        Self::decode(response).await
    }

    /// Classify the HTTP status and unwrap the GraphQL envelope.
    async fn decode(response: reqwest::Response) -> Result<serde_json::Value, MagentoError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(MagentoError::RateLimited(retry_after));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MagentoError::Transient(e.to_string()))?;

        if status.is_server_error() {
            return Err(MagentoError::Transient(format!(
                "HTTP {status}: {}",
                truncate(&body, 200)
            )));
        }
        if !status.is_success() {
            return Err(MagentoError::Permanent {
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            debug!(?errors, "GraphQL errors in response");
            return Err(MagentoError::GraphQL(errors));
        }

        envelope.data.ok_or_else(|| {
            MagentoError::GraphQL(vec![GraphQLError {
                message: "no data in response".to_string(),
                extensions: crate::magento::GraphQLExtensions::default(),
            }])
        })
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_errors() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"errors": [{"message": "boom", "extensions": {"category": "graphql"}}]}"#,
        )
        .expect("valid envelope");
        assert!(envelope.data.is_none());
        let errors = envelope.errors.expect("errors present");
        assert_eq!(errors.len(), 1);
        let first = errors.first().expect("one error");
        assert_eq!(first.category(), Some("graphql"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("g\u{1ea1}o n\u{1ebf}p", 3), "g\u{1ea1}o");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
