//! Technical structure pillar

use tickergrade::indicators::{
    compute_snapshot, CrossKind, InsufficientHistory, MacdCross, RsiDivergence,
};
use tickergrade::models::indicators::{IndicatorSnapshot, MacdPoint};
use tickergrade::models::report::{
    MacdState, PillarDetails, RsiSignal, TechnicalDetails, TrendStructure, VolumeSignal,
};
use tickergrade::signals::score_technicals;

use crate::fixtures::uptrend_bars;

fn missing(indicator: &'static str) -> InsufficientHistory {
    InsufficientHistory {
        indicator,
        required: 1,
        available: 0,
    }
}

/// Snapshot with every indicator missing, so each test switches on only what it exercises
fn bare_snapshot() -> IndicatorSnapshot {
    IndicatorSnapshot {
        close: 100.0,
        open: 99.0,
        volume: 1_000.0,
        sma50: Err(missing("sma50")),
        sma200: Err(missing("sma200")),
        volume_sma20: Err(missing("volume_sma")),
        high_52w: Err(missing("high_52w")),
        rsi14: Err(missing("rsi")),
        macd: Err(missing("macd")),
        atr14: Err(missing("atr")),
        divergence: Err(missing("rsi_divergence")),
        macd_cross: Err(missing("macd_cross")),
        support_20: 95.0,
    }
}

fn details(snapshot: &IndicatorSnapshot) -> (f64, TechnicalDetails) {
    let pillar = score_technicals(snapshot, 250);
    match pillar.details {
        PillarDetails::Technicals(d) => (pillar.score, d),
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn short_history_is_neutral_and_degraded() {
    let bars = uptrend_bars(30);
    let snapshot = compute_snapshot(&bars).unwrap();
    let pillar = score_technicals(&snapshot, bars.len());

    assert_eq!(pillar.score, 5.0);
    assert!(pillar.degraded());
    let PillarDetails::Technicals(d) = &pillar.details else {
        panic!("technical details expected");
    };
    assert!(d.insufficient_history.iter().any(|h| h.indicator == "technical_structure"));
}

#[test]
fn bullish_divergence_adds_three_points() {
    let mut snapshot = bare_snapshot();
    snapshot.rsi14 = Ok(60.0);
    snapshot.divergence = Ok(RsiDivergence::Bullish);

    let (score, d) = details(&snapshot);
    assert_eq!(score, 8.0);
    assert_eq!(d.rsi_signal, Some(RsiSignal::BullishDivergence));
}

#[test]
fn divergence_replaces_the_rsi_zone() {
    let mut snapshot = bare_snapshot();
    snapshot.rsi14 = Ok(60.0);
    snapshot.divergence = Ok(RsiDivergence::None);
    let (zone_only, _) = details(&snapshot);

    snapshot.divergence = Ok(RsiDivergence::Bearish);
    let (diverged, d) = details(&snapshot);

    assert_eq!(zone_only, 6.0);
    assert_eq!(diverged, 2.0);
    assert_eq!(d.rsi_signal, Some(RsiSignal::BearishDivergence));
}

#[test]
fn rsi_zones_follow_the_table() {
    let cases = [
        (45.0, RsiSignal::NeutralBullish, 6.5),
        (80.0, RsiSignal::Overextended, 3.5),
        (25.0, RsiSignal::Oversold, 6.0),
        (60.0, RsiSignal::Momentum, 6.0),
        (35.0, RsiSignal::Neutral, 5.0),
    ];
    for (rsi, signal, expected) in cases {
        let mut snapshot = bare_snapshot();
        snapshot.rsi14 = Ok(rsi);
        snapshot.divergence = Ok(RsiDivergence::None);
        let (score, d) = details(&snapshot);
        assert_eq!(d.rsi_signal, Some(signal), "rsi {rsi}");
        assert_eq!(score, expected, "rsi {rsi}");
    }
}

#[test]
fn most_recent_death_cross_overrides_earlier_golden_cross() {
    let mut snapshot = bare_snapshot();
    snapshot.macd = Ok(MacdPoint {
        macd: 0.4,
        signal: 0.5,
        histogram: -0.1,
    });
    snapshot.macd_cross = Ok(Some(MacdCross {
        kind: CrossKind::Death,
        bars_ago: 1,
    }));

    let (score, d) = details(&snapshot);
    assert_eq!(score, 3.0);
    assert_eq!(d.macd_state, Some(MacdState::DeathCross));
    assert_eq!(d.macd_cross_bars_ago, Some(1));
}

#[test]
fn macd_position_scores_without_a_cross() {
    let mut snapshot = bare_snapshot();
    snapshot.macd_cross = Ok(None);
    snapshot.macd = Ok(MacdPoint {
        macd: 1.0,
        signal: 0.5,
        histogram: 0.5,
    });
    let (above, d) = details(&snapshot);
    assert_eq!(above, 6.5);
    assert_eq!(d.macd_state, Some(MacdState::AboveSignal));

    snapshot.macd = Ok(MacdPoint {
        macd: 0.5,
        signal: 1.0,
        histogram: -0.5,
    });
    let (below, _) = details(&snapshot);
    assert_eq!(below, 4.0);
}

#[test]
fn golden_cross_scores_two_and_a_half() {
    let mut snapshot = bare_snapshot();
    snapshot.macd = Ok(MacdPoint {
        macd: 0.6,
        signal: 0.5,
        histogram: 0.1,
    });
    snapshot.macd_cross = Ok(Some(MacdCross {
        kind: CrossKind::Golden,
        bars_ago: 3,
    }));
    let (score, d) = details(&snapshot);
    assert_eq!(score, 7.5);
    assert_eq!(d.macd_state, Some(MacdState::GoldenCross));
}

#[test]
fn volume_needs_a_green_candle_to_confirm() {
    let mut snapshot = bare_snapshot();
    snapshot.volume_sma20 = Ok(500.0);

    let (green, d) = details(&snapshot);
    assert_eq!(green, 6.5);
    assert_eq!(d.volume_signal, Some(VolumeSignal::StrongBuying));

    snapshot.open = 101.0;
    let (red, d) = details(&snapshot);
    assert_eq!(red, 4.5);
    assert_eq!(d.volume_signal, Some(VolumeSignal::HeavySelling));

    snapshot.volume_sma20 = Ok(5_000.0);
    let (quiet, d) = details(&snapshot);
    assert_eq!(quiet, 5.0);
    assert_eq!(d.volume_signal, Some(VolumeSignal::LowVolume));
}

#[test]
fn moving_average_stack_sets_the_trend() {
    let mut snapshot = bare_snapshot();
    snapshot.sma50 = Ok(98.0);
    snapshot.sma200 = Ok(90.0);
    let (up, d) = details(&snapshot);
    assert_eq!(up, 6.0);
    assert_eq!(d.trend, Some(TrendStructure::Uptrend));

    snapshot.sma50 = Ok(102.0);
    snapshot.sma200 = Ok(110.0);
    let (down, d) = details(&snapshot);
    assert_eq!(down, 4.0);
    assert_eq!(d.trend, Some(TrendStructure::Downtrend));
}

#[test]
fn missing_indicators_are_listed() {
    let (score, d) = details(&bare_snapshot());
    assert_eq!(score, 5.0);
    let names: Vec<&str> = d.insufficient_history.iter().map(|h| h.indicator).collect();
    for name in ["sma50", "sma200", "volume_sma", "rsi", "macd", "rsi_divergence"] {
        assert!(names.contains(&name), "{name} missing from {names:?}");
    }
}

#[test]
fn score_stays_in_range_for_real_history() {
    let bars = uptrend_bars(300);
    let snapshot = compute_snapshot(&bars).unwrap();
    let pillar = score_technicals(&snapshot, bars.len());
    assert!((0.0..=10.0).contains(&pillar.score));
    assert_eq!(pillar.weight, 35.0);
    assert!(!pillar.degraded());
}
