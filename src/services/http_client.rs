//! Shared fetch-with-retry for every provider client.
//!
//! Each attempt runs under its own timeout. Only server errors, timeouts and
//! transport failures are retried; 4xx responses return immediately.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use prometheus::IntCounter;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::services::error::{ProviderError, ProviderResult};

const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first one
    pub max_attempts: usize,
    /// Delay before the first retry; doubles on each further retry
    pub base_delay: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            attempt_timeout: Duration::from_secs(12),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_factor(2.0)
            .with_max_times(self.max_attempts.saturating_sub(1))
    }
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
    retries: Option<IntCounter>,
}

impl HttpFetcher {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            policy,
            retries: None,
        }
    }

    /// Count every retry in `counter`
    pub fn with_retry_counter(mut self, counter: IntCounter) -> Self {
        self.retries = Some(counter);
        self
    }

    /// GET `url` and decode the JSON body, retrying per the policy
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        provider: &'static str,
        url: &str,
        query: &[(&str, String)],
        bearer: Option<&str>,
    ) -> ProviderResult<T> {
        let attempt = || async { self.attempt::<T>(url, query, bearer).await };

        attempt
            .retry(self.policy.backoff())
            .sleep(tokio::time::sleep)
            .when(ProviderError::is_retryable)
            .notify(|e: &ProviderError, delay: Duration| {
                warn!(
                    provider,
                    url,
                    error = %e,
                    retry_in_ms = delay.as_millis() as u64,
                    "Provider call failed, retrying"
                );
                if let Some(counter) = &self.retries {
                    counter.inc();
                }
            })
            .await
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        bearer: Option<&str>,
    ) -> ProviderResult<T> {
        let timeout = self.policy.attempt_timeout;
        let call = async {
            let mut request = self.client.get(url).query(query);
            if let Some(token) = bearer {
                request = request.bearer_auth(token);
            }
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
                return Err(ProviderError::from_status(status.as_u16(), body));
            }
            let bytes = response.bytes().await?;
            serde_json::from_slice::<T>(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))
        };

        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                debug!(url, timeout_ms = timeout.as_millis() as u64, "Provider attempt timed out");
                Err(ProviderError::Timeout(timeout))
            }
        }
    }
}
