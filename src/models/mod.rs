//! Shared data models spanning acquisition, indicators, scoring and staging.

pub mod indicators;
pub mod market;
pub mod report;
pub mod staging;
pub mod ticker;

pub use indicators::{IndicatorSnapshot, MacdPoint, MacdSeries};
pub use market::{
    AnalystRatings, CompanyProfile, EarningsCalendar, Fundamentals, MacroObservation,
    MacroSeries, NewsHeadline, OptionsSentiment, PriceBar, PriceTarget, RatingChange,
    RecommendationCounts, TickerData,
};
pub use report::{
    BlackoutReason, CatalystDetails, ConsensusBand, EventRiskDetails, EventRiskState,
    MacdState, MacroDetails, PillarDetails, PillarKind, PillarResult, Pillars, PricePoint,
    RatingAction, RsiSignal, ScoreReport, SpreadTrend, TargetBasis, TechnicalDetails,
    TradeSetup, TrendStructure, UpsideSource, ValuationMetric, ValuationSignal, ValueDetails,
    Verdict, VerdictType, VolumeSignal,
};
pub use staging::{Direction, StagingCandidate, TradeIdea};
pub use ticker::Ticker;
