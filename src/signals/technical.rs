//! Technical Structure pillar.
//!
//! A fixed rule table applied to the indicator snapshot. Every adjustment is a
//! named constant so a score can be reproduced by hand from its details.

use crate::indicators::{CrossKind, InsufficientHistory, RsiDivergence};
use crate::indicators::math::round_to;
use crate::indicators::trend::trend_aligned;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::report::{
    MacdState, PillarDetails, PillarKind, PillarResult, RsiSignal, TechnicalDetails,
    TrendStructure, VolumeSignal,
};
use crate::signals::{build_pillar, NEUTRAL_SCORE};

pub const MIN_TECHNICAL_BARS: usize = 60;

pub const DIVERGENCE_BONUS: f64 = 3.0;
pub const DIVERGENCE_PENALTY: f64 = -3.0;
pub const RSI_NEUTRAL_BULLISH_BONUS: f64 = 1.5;
pub const RSI_MOMENTUM_BONUS: f64 = 1.0;
pub const RSI_OVERSOLD_BONUS: f64 = 1.0;
pub const RSI_OVEREXTENDED_PENALTY: f64 = -1.5;
pub const GOLDEN_CROSS_DELTA: f64 = 2.5;
pub const DEATH_CROSS_DELTA: f64 = -2.0;
pub const MACD_ABOVE_SIGNAL_DELTA: f64 = 1.5;
pub const MACD_BELOW_SIGNAL_DELTA: f64 = -1.0;
pub const VOLUME_CONFIRMATION_BONUS: f64 = 1.5;
pub const HEAVY_SELLING_PENALTY: f64 = -0.5;
pub const UPTREND_BONUS: f64 = 1.0;
pub const DOWNTREND_PENALTY: f64 = -1.0;

fn rsi_zone(rsi: f64) -> (RsiSignal, f64) {
    if (40.0..=50.0).contains(&rsi) {
        (RsiSignal::NeutralBullish, RSI_NEUTRAL_BULLISH_BONUS)
    } else if rsi > 75.0 {
        (RsiSignal::Overextended, RSI_OVEREXTENDED_PENALTY)
    } else if rsi < 30.0 {
        (RsiSignal::Oversold, RSI_OVERSOLD_BONUS)
    } else if rsi > 50.0 {
        (RsiSignal::Momentum, RSI_MOMENTUM_BONUS)
    } else {
        (RsiSignal::Neutral, 0.0)
    }
}

pub fn score_technicals(snapshot: &IndicatorSnapshot, bar_count: usize) -> PillarResult {
    let mut details = TechnicalDetails {
        current_price: round_to(snapshot.close, 2),
        volume: snapshot.volume,
        stop_support: round_to(snapshot.support_20, 2),
        ..Default::default()
    };

    if let Err(short) = InsufficientHistory::check("technical_structure", MIN_TECHNICAL_BARS, bar_count) {
        details.insufficient_history.push(short);
        details.degraded = true;
        return build_pillar(PillarKind::Technicals, NEUTRAL_SCORE, PillarDetails::Technicals(details));
    }

    let mut score = NEUTRAL_SCORE;
    let mut record = |result: &Result<_, InsufficientHistory>| {
        if let Err(e) = result {
            details.insufficient_history.push(*e);
        }
    };
    record(&snapshot.sma50.map(|_| ()));
    record(&snapshot.sma200.map(|_| ()));
    record(&snapshot.volume_sma20.map(|_| ()));
    record(&snapshot.rsi14.map(|_| ()));
    record(&snapshot.macd.map(|_| ()));
    record(&snapshot.divergence.map(|_| ()));

    // RSI: divergence dominates, otherwise the zone table
    details.rsi = snapshot.rsi14.ok().map(|v| round_to(v, 2));
    let divergence = snapshot.divergence.unwrap_or(RsiDivergence::None);
    details.divergence = Some(divergence);
    match divergence {
        RsiDivergence::Bullish => {
            score += DIVERGENCE_BONUS;
            details.rsi_signal = Some(RsiSignal::BullishDivergence);
        }
        RsiDivergence::Bearish => {
            score += DIVERGENCE_PENALTY;
            details.rsi_signal = Some(RsiSignal::BearishDivergence);
        }
        RsiDivergence::None => {
            if let Ok(rsi) = snapshot.rsi14 {
                let (signal, delta) = rsi_zone(rsi);
                score += delta;
                details.rsi_signal = Some(signal);
            }
        }
    }

    // MACD: the most recent cross wins, otherwise line position
    if let Ok(macd) = snapshot.macd {
        details.macd = Some(round_to(macd.macd, 4));
        details.macd_signal = Some(round_to(macd.signal, 4));

        let cross = snapshot.macd_cross.ok().flatten();
        let (state, delta) = match cross {
            Some(c) if c.kind == CrossKind::Golden => (MacdState::GoldenCross, GOLDEN_CROSS_DELTA),
            Some(_) => (MacdState::DeathCross, DEATH_CROSS_DELTA),
            None if macd.macd > macd.signal => (MacdState::AboveSignal, MACD_ABOVE_SIGNAL_DELTA),
            None => (MacdState::BelowSignal, MACD_BELOW_SIGNAL_DELTA),
        };
        details.macd_state = Some(state);
        details.macd_cross_bars_ago = cross.map(|c| c.bars_ago);
        score += delta;
    }

    if let Ok(avg_volume) = snapshot.volume_sma20 {
        details.volume_sma20 = Some(avg_volume.round());
        let (signal, delta) = match snapshot.volume_confirmed() {
            Some(true) => (VolumeSignal::StrongBuying, VOLUME_CONFIRMATION_BONUS),
            _ if snapshot.volume > avg_volume => (VolumeSignal::HeavySelling, HEAVY_SELLING_PENALTY),
            _ => (VolumeSignal::LowVolume, 0.0),
        };
        details.volume_signal = Some(signal);
        score += delta;
    }

    details.sma50 = snapshot.sma50.ok().map(|v| round_to(v, 2));
    details.sma200 = snapshot.sma200.ok().map(|v| round_to(v, 2));
    if let (Ok(short), Ok(long)) = (snapshot.sma50, snapshot.sma200) {
        let (trend, delta) = match trend_aligned(snapshot.close, short, long) {
            1 => (TrendStructure::Uptrend, UPTREND_BONUS),
            -1 => (TrendStructure::Downtrend, DOWNTREND_PENALTY),
            _ => (TrendStructure::Mixed, 0.0),
        };
        details.trend = Some(trend);
        score += delta;
    }

    build_pillar(PillarKind::Technicals, score, PillarDetails::Technicals(details))
}
