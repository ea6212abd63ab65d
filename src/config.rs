//! Environment-driven configuration
//!
//! Values are read once by the binary and handed to the engine explicitly;
//! nothing in the scoring path reads the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::http_client::RetryPolicy;

pub const DEFAULT_MARKETDATA_BASE_URL: &str = "https://api.marketdata.app/v1";
pub const DEFAULT_FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";
pub const DEFAULT_FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Deployment environment name (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Base URL and credential for one upstream provider
#[derive(Debug, Clone)]
pub struct ProviderEndpoint {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl ProviderEndpoint {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }

    fn from_env(url_var: &str, key_var: &str, default_url: &str) -> Self {
        Self {
            base_url: env::var(url_var).unwrap_or_else(|_| default_url.to_string()),
            api_key: env::var(key_var).ok().filter(|k| !k.is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub marketdata: ProviderEndpoint,
    pub finnhub: ProviderEndpoint,
    pub fred: ProviderEndpoint,
    pub retry: RetryPolicy,
    /// Overall deadline for one ticker evaluation, retries included
    pub request_deadline: Duration,
    pub scanner_concurrency: usize,
    pub watchlist: Vec<String>,
    pub scan_cron: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            marketdata: ProviderEndpoint::new(DEFAULT_MARKETDATA_BASE_URL, None),
            finnhub: ProviderEndpoint::new(DEFAULT_FINNHUB_BASE_URL, None),
            fred: ProviderEndpoint::new(DEFAULT_FRED_BASE_URL, None),
            retry: RetryPolicy::default(),
            request_deadline: Duration::from_secs(30),
            scanner_concurrency: 4,
            watchlist: Vec::new(),
            scan_cron: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let retry = RetryPolicy {
            max_attempts: parse_var("PROVIDER_MAX_ATTEMPTS").unwrap_or(defaults.retry.max_attempts),
            base_delay: parse_var("PROVIDER_BACKOFF_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry.base_delay),
            attempt_timeout: parse_var("PROVIDER_TIMEOUT_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry.attempt_timeout),
        };

        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            marketdata: ProviderEndpoint::from_env(
                "MARKETDATA_BASE_URL",
                "MARKETDATA_API_KEY",
                DEFAULT_MARKETDATA_BASE_URL,
            ),
            finnhub: ProviderEndpoint::from_env(
                "FINNHUB_BASE_URL",
                "FINNHUB_API_KEY",
                DEFAULT_FINNHUB_BASE_URL,
            ),
            fred: ProviderEndpoint::from_env("FRED_BASE_URL", "FRED_API_KEY", DEFAULT_FRED_BASE_URL),
            retry,
            request_deadline: parse_var("REQUEST_DEADLINE_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_deadline),
            scanner_concurrency: parse_var::<usize>("SCANNER_CONCURRENCY")
                .unwrap_or(defaults.scanner_concurrency)
                .max(1),
            watchlist: env::var("SCANNER_WATCHLIST")
                .map(|list| parse_watchlist(&list))
                .unwrap_or_default(),
            scan_cron: env::var("SCAN_CRON").ok().filter(|c| !c.trim().is_empty()),
        }
    }
}

/// Split a comma separated ticker list, keeping first occurrences only
pub fn parse_watchlist(raw: &str) -> Vec<String> {
    let mut tickers: Vec<String> = Vec::new();
    for ticker in raw.split(',').map(|t| t.trim().to_uppercase()) {
        if !ticker.is_empty() && !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    tickers
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
