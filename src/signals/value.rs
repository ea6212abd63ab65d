//! Relative Value pillar: PEG with an explicit P/S fallback, plus upside to a reference price

use crate::indicators::math::round_to;
use crate::models::market::{AnalystRatings, Fundamentals};
use crate::models::report::{
    PillarDetails, PillarKind, PillarResult, UpsideSource, ValuationMetric, ValuationSignal,
    ValueDetails,
};
use crate::signals::{build_pillar, NEUTRAL_SCORE};

pub const PEG_CHEAP: f64 = 1.0;
pub const PEG_EXPENSIVE: f64 = 2.0;
pub const PEG_CHEAP_BONUS: f64 = 2.5;
pub const PEG_EXPENSIVE_PENALTY: f64 = -1.5;
pub const PS_CHEAP: f64 = 3.0;
pub const PS_EXPENSIVE: f64 = 10.0;
pub const PS_CHEAP_BONUS: f64 = 2.0;
pub const PS_EXPENSIVE_PENALTY: f64 = -1.5;

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Score delta for a given upside percentage
pub fn upside_delta(upside_pct: f64) -> f64 {
    if upside_pct > 25.0 {
        2.5
    } else if upside_pct > 15.0 {
        2.0
    } else if upside_pct > 10.0 {
        1.0
    } else if upside_pct < 0.0 {
        -1.5
    } else {
        0.0
    }
}

/// Degraded when fundamentals are missing or the analyst target could not be
/// looked up, since the upside then falls back to the 52-week high.
pub fn score_value(
    fundamentals: Option<&Fundamentals>,
    ratings: Option<&AnalystRatings>,
    current_price: f64,
    high_52w: Option<f64>,
) -> PillarResult {
    let price_target = ratings.and_then(|r| r.price_target.as_ref());
    let mut details = ValueDetails {
        degraded: fundamentals.is_none() || ratings.map_or(true, |r| r.target_unavailable),
        ..Default::default()
    };
    let mut score = NEUTRAL_SCORE;

    if let Some(fundamentals) = fundamentals {
        if let Some(peg) = positive(fundamentals.peg_ratio) {
            details.valuation_metric = ValuationMetric::Peg;
            details.peg_ratio = Some(round_to(peg, 2));
            let (signal, delta) = if peg < PEG_CHEAP {
                (ValuationSignal::UndervaluedGrowth, PEG_CHEAP_BONUS)
            } else if peg > PEG_EXPENSIVE {
                (ValuationSignal::Overvalued, PEG_EXPENSIVE_PENALTY)
            } else {
                (ValuationSignal::Neutral, 0.0)
            };
            details.valuation_signal = signal;
            score += delta;
        } else if let Some(ps) = positive(fundamentals.ps_ratio) {
            details.valuation_metric = ValuationMetric::PriceToSales;
            details.ps_ratio = Some(round_to(ps, 2));
            let (signal, delta) = if ps < PS_CHEAP {
                (ValuationSignal::CheapRevenue, PS_CHEAP_BONUS)
            } else if ps > PS_EXPENSIVE {
                (ValuationSignal::Expensive, PS_EXPENSIVE_PENALTY)
            } else {
                (ValuationSignal::Neutral, 0.0)
            };
            details.valuation_signal = signal;
            score += delta;
        }
    }

    let analyst_target = positive(price_target.map(|t| t.mean));
    details.price_target = analyst_target.map(|v| round_to(v, 2));
    details.high_52w = high_52w.map(|v| round_to(v, 2));

    let reference = analyst_target
        .map(|t| (t, UpsideSource::AnalystTarget))
        .or_else(|| positive(high_52w).map(|h| (h, UpsideSource::Week52High)));
    if let Some((reference, source)) = reference {
        if current_price > 0.0 {
            let upside_pct = (reference - current_price) / current_price * 100.0;
            details.upside_pct = Some(round_to(upside_pct, 2));
            details.upside_source = Some(source);
            score += upside_delta(upside_pct);
        }
    }

    build_pillar(PillarKind::Value, score, PillarDetails::Value(details))
}
