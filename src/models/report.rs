//! The engine's output contract
//!
//! `ScoreReport` is derived fresh per request and never persisted. Field
//! order is fixed so identical inputs serialise to identical bytes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::indicators::{InsufficientHistory, RsiDivergence};

/// The five scoring dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarKind {
    Catalysts,
    Technicals,
    Value,
    Macro,
    EventRisk,
}

impl PillarKind {
    pub const ALL: [PillarKind; 5] = [
        PillarKind::Catalysts,
        PillarKind::Technicals,
        PillarKind::Value,
        PillarKind::Macro,
        PillarKind::EventRisk,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PillarKind::Catalysts => "Catalysts & Sentiment",
            PillarKind::Technicals => "Technical Structure",
            PillarKind::Value => "Relative Value",
            PillarKind::Macro => "Macro Liquidity",
            PillarKind::EventRisk => "Event Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarResult {
    pub score: f64,
    pub weight: f64,
    pub name: String,
    pub details: PillarDetails,
}

impl PillarResult {
    pub fn degraded(&self) -> bool {
        match &self.details {
            PillarDetails::Catalysts(d) => d.degraded,
            PillarDetails::Technicals(d) => d.degraded,
            PillarDetails::Value(d) => d.degraded,
            PillarDetails::Macro(d) => d.degraded,
            PillarDetails::EventRisk(d) => d.degraded,
        }
    }
}

/// Explanatory fields, one shape per pillar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PillarDetails {
    Catalysts(CatalystDetails),
    Technicals(TechnicalDetails),
    Value(ValueDetails),
    Macro(MacroDetails),
    EventRisk(EventRiskDetails),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConsensusBand {
    #[serde(rename = "Strong-Buy-Consensus")]
    StrongBuyConsensus,
    #[serde(rename = "Buy-Consensus")]
    BuyConsensus,
    #[serde(rename = "Mixed")]
    Mixed,
    #[serde(rename = "Sell-Consensus")]
    SellConsensus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingAction {
    Upgrade,
    Downgrade,
    Maintain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalystDetails {
    pub consensus_score: Option<f64>,
    pub consensus_band: Option<ConsensusBand>,
    pub analyst_count: u32,
    pub latest_action: Option<RatingAction>,
    pub latest_action_firm: Option<String>,
    pub latest_action_date: Option<NaiveDate>,
    pub upgrades_30d: u32,
    pub downgrades_30d: u32,
    pub avg_sentiment: Option<f64>,
    pub articles_analyzed: usize,
    pub degraded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    BullishDivergence,
    BearishDivergence,
    NeutralBullish,
    Momentum,
    Oversold,
    Overextended,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdState {
    GoldenCross,
    DeathCross,
    AboveSignal,
    BelowSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeSignal {
    StrongBuying,
    HeavySelling,
    LowVolume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStructure {
    Uptrend,
    Downtrend,
    Mixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechnicalDetails {
    pub current_price: f64,
    pub rsi: Option<f64>,
    pub rsi_signal: Option<RsiSignal>,
    pub divergence: Option<RsiDivergence>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_state: Option<MacdState>,
    pub macd_cross_bars_ago: Option<usize>,
    pub volume: f64,
    pub volume_sma20: Option<f64>,
    pub volume_signal: Option<VolumeSignal>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub trend: Option<TrendStructure>,
    pub stop_support: f64,
    pub insufficient_history: Vec<InsufficientHistory>,
    pub degraded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValuationMetric {
    #[serde(rename = "PEG")]
    Peg,
    #[serde(rename = "P/S")]
    PriceToSales,
    #[serde(rename = "none")]
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationSignal {
    UndervaluedGrowth,
    CheapRevenue,
    Neutral,
    Overvalued,
    Expensive,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsideSource {
    AnalystTarget,
    Week52High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDetails {
    pub valuation_metric: ValuationMetric,
    pub valuation_signal: ValuationSignal,
    pub peg_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
    pub price_target: Option<f64>,
    pub high_52w: Option<f64>,
    pub upside_pct: Option<f64>,
    pub upside_source: Option<UpsideSource>,
    pub degraded: bool,
}

impl Default for ValueDetails {
    fn default() -> Self {
        Self {
            valuation_metric: ValuationMetric::Unavailable,
            valuation_signal: ValuationSignal::Unknown,
            peg_ratio: None,
            ps_ratio: None,
            price_target: None,
            high_52w: None,
            upside_pct: None,
            upside_source: None,
            degraded: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadTrend {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacroDetails {
    pub observations: usize,
    pub net_liquidity_current: Option<f64>,
    pub net_liquidity_slope: Option<f64>,
    /// Slope per observation as a percent of the current level
    pub net_liquidity_slope_pct: Option<f64>,
    pub liquidity_expanding: Option<bool>,
    pub credit_spread: Option<f64>,
    pub credit_spread_trend: Option<SpreadTrend>,
    pub risk_off: Option<bool>,
    pub defensive_cap_applied: bool,
    pub degraded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlackoutReason {
    PreEarnings,
    PostEarnings,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventRiskState {
    pub blackout: bool,
    pub reason: BlackoutReason,
    pub days_to_earnings: Option<i64>,
    pub put_call_ratio: Option<f64>,
}

impl Default for EventRiskState {
    fn default() -> Self {
        Self {
            blackout: false,
            reason: BlackoutReason::None,
            days_to_earnings: None,
            put_call_ratio: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventRiskDetails {
    #[serde(flatten)]
    pub state: EventRiskState,
    pub next_earnings: Option<NaiveDate>,
    pub last_earnings: Option<NaiveDate>,
    pub days_since_earnings: Option<i64>,
    pub pcr_warning: bool,
    pub degraded: bool,
}

/// The five pillar results under fixed keys
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pillars {
    pub catalysts: PillarResult,
    pub technicals: PillarResult,
    pub value: PillarResult,
    #[serde(rename = "macro")]
    pub macro_liquidity: PillarResult,
    pub event_risk: PillarResult,
}

impl Pillars {
    pub fn iter(&self) -> impl Iterator<Item = (PillarKind, &PillarResult)> {
        [
            (PillarKind::Catalysts, &self.catalysts),
            (PillarKind::Technicals, &self.technicals),
            (PillarKind::Value, &self.value),
            (PillarKind::Macro, &self.macro_liquidity),
            (PillarKind::EventRisk, &self.event_risk),
        ]
        .into_iter()
    }

    pub fn total_weight(&self) -> f64 {
        self.iter().map(|(_, p)| p.weight).sum()
    }

    /// Event-risk gating state, if the event-risk pillar carries one
    pub fn event_risk_state(&self) -> EventRiskState {
        match &self.event_risk.details {
            PillarDetails::EventRisk(d) => d.state,
            _ => EventRiskState::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    StrongBuy,
    Buy,
    Hold,
    Avoid,
    WaitEarnings,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::StrongBuy => "Strong Buy",
            Verdict::Buy => "Buy",
            Verdict::Hold => "Hold",
            Verdict::Avoid => "Avoid / Sell",
            Verdict::WaitEarnings => "WAIT (Earnings)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictType {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetBasis {
    Atr,
    AnalystTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSetup {
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub risk_reward: Option<f64>,
    pub atr: f64,
    pub target_basis: TargetBasis,
}

/// One row of the chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_sma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma200: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub ticker: String,
    pub company_name: String,
    pub as_of: NaiveDate,
    pub current_price: f64,
    pub final_score: f64,
    pub verdict: String,
    pub verdict_type: VerdictType,
    pub thresholds_version: String,
    pub pillars: Pillars,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_setup: Option<TradeSetup>,
    pub price_history: Vec<PricePoint>,
}

impl ScoreReport {
    pub fn blackout(&self) -> bool {
        self.pillars.event_risk_state().blackout
    }
}
