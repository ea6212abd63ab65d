//! Configuration parsing

use std::time::Duration;

use tickergrade::config::{parse_watchlist, AppConfig};
use tickergrade::services::RetryPolicy;

#[test]
fn watchlist_is_normalised_and_deduplicated() {
    assert_eq!(
        parse_watchlist("aapl, MSFT,aapl,, nvda "),
        vec!["AAPL".to_string(), "MSFT".to_string(), "NVDA".to_string()]
    );
    assert!(parse_watchlist("  ,  ").is_empty());
}

#[test]
fn defaults_match_the_documented_policy() {
    let config = AppConfig::default();
    assert_eq!(config.port, 8080);
    assert_eq!(config.scanner_concurrency, 4);
    assert_eq!(config.request_deadline, Duration::from_secs(30));
    assert!(config.scan_cron.is_none());

    let retry = RetryPolicy::default();
    assert_eq!(retry.max_attempts, 3);
    assert_eq!(retry.base_delay, Duration::from_millis(1000));
    assert_eq!(retry.attempt_timeout, Duration::from_secs(12));
}
