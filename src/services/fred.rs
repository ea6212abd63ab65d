//! FRED series observations for the liquidity inputs

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use crate::config::ProviderEndpoint;
use crate::models::market::{MacroObservation, MacroSeries};
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::http_client::HttpFetcher;

const PROVIDER: &str = "fred";

pub const MACRO_WINDOW_DAYS: i64 = 180;

/// A FRED series and the factor that converts it to millions of dollars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FredSeries {
    pub id: &'static str,
    pub scale: f64,
}

pub const FED_BALANCE_SHEET: FredSeries = FredSeries { id: "WALCL", scale: 1.0 };
pub const TREASURY_GENERAL_ACCOUNT: FredSeries = FredSeries { id: "WTREGEN", scale: 1000.0 };
pub const REVERSE_REPO: FredSeries = FredSeries { id: "RRPONTSYD", scale: 1000.0 };
/// Percent, left unscaled
pub const HIGH_YIELD_SPREAD: FredSeries = FredSeries { id: "BAMLH0A0HYM2", scale: 1.0 };

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: NaiveDate,
    /// Numeric string, or "." when the value is missing
    value: String,
}

#[derive(Clone)]
pub struct FredClient {
    endpoint: ProviderEndpoint,
    fetcher: HttpFetcher,
}

impl FredClient {
    pub fn new(endpoint: ProviderEndpoint, fetcher: HttpFetcher) -> Self {
        Self { endpoint, fetcher }
    }

    pub async fn observations(
        &self,
        series: FredSeries,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ProviderResult<Vec<MacroObservation>> {
        let api_key = self
            .endpoint
            .api_key
            .clone()
            .ok_or(ProviderError::MissingCredentials(PROVIDER))?;
        let url = format!(
            "{}/series/observations",
            self.endpoint.base_url.trim_end_matches('/')
        );
        let query = [
            ("series_id", series.id.to_string()),
            ("api_key", api_key),
            ("file_type", "json".to_string()),
            ("observation_start", start.to_string()),
            ("observation_end", end.to_string()),
        ];
        let body: ObservationsResponse = self.fetcher.get_json(PROVIDER, &url, &query, None).await?;

        let observations: Vec<MacroObservation> = body
            .observations
            .into_iter()
            .filter_map(|o| {
                let value: f64 = o.value.trim().parse().ok()?;
                Some(MacroObservation {
                    date: o.date,
                    value: value * series.scale,
                })
            })
            .collect();

        if observations.is_empty() {
            return Err(ProviderError::NotFound(format!("series {}", series.id)));
        }
        Ok(observations)
    }

    /// Liquidity inputs over the trailing window. The credit spread is
    /// best-effort; the three balance-sheet series are required.
    pub async fn macro_series(&self, as_of: NaiveDate) -> ProviderResult<MacroSeries> {
        let start = as_of - Duration::days(MACRO_WINDOW_DAYS);
        let (walcl, tga, rrp, spread) = tokio::join!(
            self.observations(FED_BALANCE_SHEET, start, as_of),
            self.observations(TREASURY_GENERAL_ACCOUNT, start, as_of),
            self.observations(REVERSE_REPO, start, as_of),
            self.observations(HIGH_YIELD_SPREAD, start, as_of),
        );

        let credit_spread = spread.unwrap_or_else(|e| {
            warn!(series = HIGH_YIELD_SPREAD.id, error = %e, "Credit spread unavailable");
            Vec::new()
        });

        Ok(MacroSeries {
            fed_balance_sheet: walcl?,
            treasury_general_account: tga?,
            reverse_repo: rrp?,
            credit_spread,
        })
    }
}
