//! MarketData.app client: daily candles and option-chain volume

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::config::ProviderEndpoint;
use crate::models::market::{OptionsSentiment, PriceBar};
use crate::models::ticker::Ticker;
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::http_client::HttpFetcher;

const PROVIDER: &str = "marketdata";
/// Option chains are limited to expirations within this many days
const OPTIONS_DTE: u32 = 30;

/// MarketData.app answers with parallel arrays plus a status flag
#[derive(Debug, Deserialize)]
struct CandlesResponse {
    s: String,
    #[serde(default)]
    t: Vec<i64>,
    #[serde(default)]
    o: Vec<f64>,
    #[serde(default)]
    h: Vec<f64>,
    #[serde(default)]
    l: Vec<f64>,
    #[serde(default)]
    c: Vec<f64>,
    #[serde(default)]
    v: Vec<f64>,
    #[serde(default)]
    errmsg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OptionChainResponse {
    s: String,
    #[serde(default)]
    side: Vec<String>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
    #[serde(default)]
    errmsg: Option<String>,
}

fn check_status(status: &str, errmsg: Option<String>, what: String) -> ProviderResult<()> {
    match status {
        "ok" => Ok(()),
        "no_data" => Err(ProviderError::NotFound(what)),
        _ => Err(ProviderError::Decode(
            errmsg.unwrap_or_else(|| format!("unexpected status {status:?} for {what}")),
        )),
    }
}

#[derive(Clone)]
pub struct MarketDataClient {
    endpoint: ProviderEndpoint,
    fetcher: HttpFetcher,
}

impl MarketDataClient {
    pub fn new(endpoint: ProviderEndpoint, fetcher: HttpFetcher) -> Self {
        Self { endpoint, fetcher }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.base_url.trim_end_matches('/'), path)
    }

    /// Daily bars in `[from, to]`, ascending by date
    pub async fn daily_candles(
        &self,
        ticker: &Ticker,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ProviderResult<Vec<PriceBar>> {
        let url = self.url(&format!("stocks/candles/D/{ticker}/"));
        let query = [("from", from.to_string()), ("to", to.to_string())];
        let body: CandlesResponse = self
            .fetcher
            .get_json(PROVIDER, &url, &query, self.endpoint.api_key.as_deref())
            .await?;
        check_status(&body.s, body.errmsg.clone(), format!("candles for {ticker}"))?;

        let n = body.t.len();
        if [body.o.len(), body.h.len(), body.l.len(), body.c.len(), body.v.len()]
            .iter()
            .any(|len| *len != n)
        {
            return Err(ProviderError::Decode(format!(
                "candle arrays for {ticker} have mismatched lengths"
            )));
        }

        let mut bars = Vec::with_capacity(n);
        for i in 0..n {
            let date = DateTime::from_timestamp(body.t[i], 0)
                .ok_or_else(|| ProviderError::Decode(format!("bad timestamp {}", body.t[i])))?
                .date_naive();
            bars.push(PriceBar::new(date, body.o[i], body.h[i], body.l[i], body.c[i], body.v[i]));
        }
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        debug!(ticker = %ticker, bars = bars.len(), "Fetched daily candles");
        Ok(bars)
    }

    /// Aggregate put and call volume over the near-dated chain
    pub async fn options_sentiment(&self, ticker: &Ticker) -> ProviderResult<OptionsSentiment> {
        let url = self.url(&format!("options/chain/{ticker}/"));
        let query = [("dte", OPTIONS_DTE.to_string())];
        let body: OptionChainResponse = self
            .fetcher
            .get_json(PROVIDER, &url, &query, self.endpoint.api_key.as_deref())
            .await?;
        check_status(&body.s, body.errmsg.clone(), format!("option chain for {ticker}"))?;

        let mut sentiment = OptionsSentiment {
            put_volume: 0.0,
            call_volume: 0.0,
        };
        for (side, volume) in body.side.iter().zip(body.volume.iter()) {
            let volume = volume.unwrap_or(0.0);
            match side.as_str() {
                "put" => sentiment.put_volume += volume,
                "call" => sentiment.call_volume += volume,
                _ => {}
            }
        }
        Ok(sentiment)
    }
}
