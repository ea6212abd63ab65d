//! Finnhub client: profile, analyst data, basic financials, news and earnings

use chrono::{DateTime, Duration, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use crate::config::ProviderEndpoint;
use crate::models::market::{
    AnalystRatings, CompanyProfile, EarningsCalendar, Fundamentals, NewsHeadline, PriceTarget,
    RatingChange, RecommendationCounts,
};
use crate::models::ticker::Ticker;
use crate::services::error::{ProviderError, ProviderResult};
use crate::services::http_client::HttpFetcher;
use crate::signals::sentiment::MAX_HEADLINES;

const PROVIDER: &str = "finnhub";

pub const NEWS_WINDOW_DAYS: i64 = 30;
pub const RATING_HISTORY_DAYS: i64 = 180;
pub const EARNINGS_LOOKBACK_DAYS: i64 = 30;
pub const EARNINGS_LOOKAHEAD_DAYS: i64 = 90;

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationTrend {
    #[serde(default)]
    strong_buy: u32,
    #[serde(default)]
    buy: u32,
    #[serde(default)]
    hold: u32,
    #[serde(default)]
    sell: u32,
    #[serde(default)]
    strong_sell: u32,
    #[serde(default)]
    period: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpgradeDowngrade {
    grade_time: i64,
    #[serde(default)]
    company: String,
    #[serde(default)]
    action: String,
    from_grade: Option<String>,
    to_grade: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceTargetResponse {
    target_mean: Option<f64>,
    target_high: Option<f64>,
    target_low: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MetricResponse {
    #[serde(default)]
    metric: Option<Metrics>,
}

#[derive(Debug, Deserialize)]
struct Metrics {
    #[serde(rename = "pegTTM")]
    peg_ttm: Option<f64>,
    #[serde(rename = "psTTM")]
    ps_ttm: Option<f64>,
    #[serde(rename = "peTTM")]
    pe_ttm: Option<f64>,
    #[serde(rename = "peBasicExclExtraTTM")]
    pe_basic: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    datetime: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarningsResponse {
    #[serde(default)]
    earnings_calendar: Vec<EarningsEntry>,
}

#[derive(Debug, Deserialize)]
struct EarningsEntry {
    date: NaiveDate,
}

fn date_from_unix(secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs, 0).map(|d| d.date_naive())
}

#[derive(Clone)]
pub struct FinnhubClient {
    endpoint: ProviderEndpoint,
    fetcher: HttpFetcher,
}

impl FinnhubClient {
    pub fn new(endpoint: ProviderEndpoint, fetcher: HttpFetcher) -> Self {
        Self { endpoint, fetcher }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ProviderResult<T> {
        let token = self
            .endpoint
            .api_key
            .clone()
            .ok_or(ProviderError::MissingCredentials(PROVIDER))?;
        let url = format!("{}/{}", self.endpoint.base_url.trim_end_matches('/'), path);
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("token", token));
        self.fetcher.get_json(PROVIDER, &url, &query, None).await
    }

    pub async fn company_profile(&self, ticker: &Ticker) -> ProviderResult<CompanyProfile> {
        let body: ProfileResponse = self
            .get("stock/profile2", &[("symbol", ticker.to_string())])
            .await?;
        body.name
            .filter(|n| !n.trim().is_empty())
            .map(|name| CompanyProfile { name })
            .ok_or_else(|| ProviderError::NotFound(format!("profile for {ticker}")))
    }

    pub async fn fundamentals(&self, ticker: &Ticker) -> ProviderResult<Fundamentals> {
        let body: MetricResponse = self
            .get(
                "stock/metric",
                &[("symbol", ticker.to_string()), ("metric", "all".to_string())],
            )
            .await?;
        let metric = body
            .metric
            .ok_or_else(|| ProviderError::NotFound(format!("financials for {ticker}")))?;
        Ok(Fundamentals {
            peg_ratio: metric.peg_ttm,
            ps_ratio: metric.ps_ttm,
            pe_ratio: metric.pe_basic.or(metric.pe_ttm),
        })
    }

    /// Recommendation trend, recent rating actions and the consensus target.
    ///
    /// Rating actions and the target are best-effort; only a failed
    /// recommendation call fails the whole lookup.
    pub async fn analyst_ratings(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<AnalystRatings> {
        let symbol = ticker.to_string();
        let from = as_of - Duration::days(RATING_HISTORY_DAYS);

        let trend_query = [("symbol", symbol.clone())];
        let change_query = [
            ("symbol", symbol.clone()),
            ("from", from.to_string()),
            ("to", as_of.to_string()),
        ];
        let target_query = [("symbol", symbol)];

        let (trends, changes, target) = tokio::join!(
            self.get::<Vec<RecommendationTrend>>("stock/recommendation", &trend_query),
            self.get::<Vec<UpgradeDowngrade>>("stock/upgrade-downgrade", &change_query),
            self.get::<PriceTargetResponse>("stock/price-target", &target_query),
        );

        let mut trends = trends?;
        // latest period first
        trends.sort_by(|a, b| b.period.cmp(&a.period));
        let recommendations = trends.first().map(|t| RecommendationCounts {
            strong_buy: t.strong_buy,
            buy: t.buy,
            hold: t.hold,
            sell: t.sell,
            strong_sell: t.strong_sell,
        });

        let changes_unavailable = changes.is_err();
        let target_unavailable = target.is_err();

        let changes = match changes {
            Ok(items) => items
                .into_iter()
                .filter_map(|u| {
                    Some(RatingChange {
                        date: date_from_unix(u.grade_time)?,
                        firm: u.company,
                        action: u.action,
                        from_grade: u.from_grade,
                        to_grade: u.to_grade,
                    })
                })
                .collect(),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Rating changes unavailable");
                Vec::new()
            }
        };

        let price_target = match target {
            Ok(t) => t.target_mean.filter(|m| *m > 0.0).map(|mean| PriceTarget {
                mean,
                high: t.target_high,
                low: t.target_low,
            }),
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Price target unavailable");
                None
            }
        };

        Ok(AnalystRatings {
            recommendations,
            changes,
            price_target,
            changes_unavailable,
            target_unavailable,
        })
    }

    /// Most recent headlines first, at most `MAX_HEADLINES`
    pub async fn company_news(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<Vec<NewsHeadline>> {
        let from = as_of - Duration::days(NEWS_WINDOW_DAYS);
        let mut items: Vec<NewsItem> = self
            .get(
                "company-news",
                &[
                    ("symbol", ticker.to_string()),
                    ("from", from.to_string()),
                    ("to", as_of.to_string()),
                ],
            )
            .await?;
        items.sort_by(|a, b| b.datetime.cmp(&a.datetime));
        Ok(items
            .into_iter()
            .filter(|n| !n.headline.trim().is_empty())
            .take(MAX_HEADLINES)
            .map(|n| NewsHeadline {
                headline: n.headline,
                source: n.source,
                published: n.datetime.and_then(date_from_unix),
            })
            .collect())
    }

    /// Closest release on or after `as_of` and the latest one before it
    pub async fn earnings_calendar(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<EarningsCalendar> {
        let body: EarningsResponse = self
            .get(
                "calendar/earnings",
                &[
                    ("symbol", ticker.to_string()),
                    ("from", (as_of - Duration::days(EARNINGS_LOOKBACK_DAYS)).to_string()),
                    ("to", (as_of + Duration::days(EARNINGS_LOOKAHEAD_DAYS)).to_string()),
                ],
            )
            .await?;

        let dates = body.earnings_calendar.iter().map(|e| e.date);
        Ok(EarningsCalendar {
            next: dates.clone().filter(|d| *d >= as_of).min(),
            last: dates.filter(|d| *d < as_of).max(),
        })
    }
}
