//! Concurrent per-ticker data acquisition.
//!
//! Price history is mandatory. Every other source degrades to `None` on
//! failure so the dependent pillar can fall back to neutral.

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::market::TickerData;
use crate::models::ticker::Ticker;
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::market_data::MarketDataProvider;

/// Calendar days of price history requested; enough for SMA200 and the 52-week high
pub const HISTORY_DAYS: i64 = 400;

fn optional<T>(source: &'static str, ticker: &Ticker, result: ProviderResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(ticker = %ticker, source, error = %e, "Optional source unavailable, pillar degraded");
            None
        }
    }
}

/// Fetch every source for `ticker` concurrently.
///
/// Dropping the returned future cancels all outstanding sub-fetches.
pub async fn acquire(
    provider: &dyn MarketDataProvider,
    ticker: &Ticker,
    as_of: NaiveDate,
) -> EngineResult<TickerData> {
    let from = as_of - Duration::days(HISTORY_DAYS);

    let (prices, profile, fundamentals, ratings, news, earnings, options, macro_series) = tokio::join!(
        provider.price_history(ticker, from, as_of),
        provider.company_profile(ticker),
        provider.fundamentals(ticker),
        provider.analyst_ratings(ticker, as_of),
        provider.news(ticker, as_of),
        provider.earnings(ticker, as_of),
        provider.options_sentiment(ticker),
        provider.macro_series(as_of),
    );

    let mut price_history = match prices {
        Ok(bars) if !bars.is_empty() => bars,
        Ok(_) | Err(ProviderError::NotFound(_)) => {
            return Err(EngineError::TickerNotFound {
                ticker: ticker.to_string(),
            })
        }
        Err(e) => {
            return Err(EngineError::DataUnavailable {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            })
        }
    };
    price_history.retain(|b| b.date <= as_of);
    price_history.sort_by_key(|b| b.date);
    price_history.dedup_by_key(|b| b.date);
    if price_history.is_empty() {
        return Err(EngineError::TickerNotFound {
            ticker: ticker.to_string(),
        });
    }

    debug!(ticker = %ticker, bars = price_history.len(), "Acquired ticker data");

    Ok(TickerData {
        price_history,
        profile: optional("profile", ticker, profile),
        fundamentals: optional("fundamentals", ticker, fundamentals),
        ratings: optional("analyst_ratings", ticker, ratings),
        news: optional("news", ticker, news),
        earnings: optional("earnings", ticker, earnings),
        options: optional("options", ticker, options),
        macro_series: optional("macro", ticker, macro_series),
    })
}
