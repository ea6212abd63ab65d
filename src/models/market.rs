//! Raw upstream data, normalised into provider-independent shapes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
}

/// Valuation ratios; any of them may be missing upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub peg_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
    pub pe_ratio: Option<f64>,
}

/// Latest recommendation-trend bucket counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCounts {
    pub strong_buy: u32,
    pub buy: u32,
    pub hold: u32,
    pub sell: u32,
    pub strong_sell: u32,
}

impl RecommendationCounts {
    pub fn total(&self) -> u32 {
        self.strong_buy + self.buy + self.hold + self.sell + self.strong_sell
    }
}

/// A single broker rating action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub date: NaiveDate,
    pub firm: String,
    /// Provider action verb (`up`, `down`, `main`, `init`, ...)
    pub action: String,
    pub from_grade: Option<String>,
    pub to_grade: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTarget {
    pub mean: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalystRatings {
    pub recommendations: Option<RecommendationCounts>,
    /// Rating actions, any order
    pub changes: Vec<RatingChange>,
    pub price_target: Option<PriceTarget>,
    /// The rating-action lookup failed; `changes` is empty rather than known-empty
    #[serde(default)]
    pub changes_unavailable: bool,
    /// The price-target lookup failed
    #[serde(default)]
    pub target_unavailable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub headline: String,
    pub source: Option<String>,
    pub published: Option<NaiveDate>,
}

/// Closest earnings events around the evaluation date
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsCalendar {
    pub next: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionsSentiment {
    pub put_volume: f64,
    pub call_volume: f64,
}

impl OptionsSentiment {
    /// Put/call ratio, undefined without call volume
    pub fn put_call_ratio(&self) -> Option<f64> {
        if self.call_volume > 0.0 {
            Some(self.put_volume / self.call_volume)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroObservation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Liquidity inputs, all expressed in millions of dollars except the spread (percent)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroSeries {
    pub fed_balance_sheet: Vec<MacroObservation>,
    pub treasury_general_account: Vec<MacroObservation>,
    pub reverse_repo: Vec<MacroObservation>,
    pub credit_spread: Vec<MacroObservation>,
}

/// Everything acquired for one ticker. Price history is mandatory; every
/// other source is `None` when its fetch failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerData {
    /// Ascending by date
    pub price_history: Vec<PriceBar>,
    pub profile: Option<CompanyProfile>,
    pub fundamentals: Option<Fundamentals>,
    pub ratings: Option<AnalystRatings>,
    pub news: Option<Vec<NewsHeadline>>,
    pub earnings: Option<EarningsCalendar>,
    pub options: Option<OptionsSentiment>,
    pub macro_series: Option<MacroSeries>,
}
