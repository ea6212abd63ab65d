//! Divergence, signal-line crosses, support and the 52-week high

use tickergrade::indicators::{
    calculate_52_week_high, detect_macd_cross, detect_rsi_divergence, recent_support,
    swing_points, CrossKind, MacdCross, RsiDivergence, DIVERGENCE_LOOKBACK, SWING_ORDER,
    TRADING_DAYS_PER_YEAR,
};
use tickergrade::models::indicators::{MacdPoint, MacdSeries};

use crate::fixtures::{as_of, bars_from_closes, uptrend_closes};

/// 30 rising closes with dips at bars 10 and 22
fn double_dip(first: f64, second: f64) -> Vec<f64> {
    (0..30)
        .map(|i| match i {
            10 => first,
            22 => second,
            _ => 100.0 + 0.5 * i as f64,
        })
        .collect()
}

/// 30 falling closes with peaks at bars 10 and 22
fn double_top(first: f64, second: f64) -> Vec<f64> {
    (0..30)
        .map(|i| match i {
            10 => first,
            22 => second,
            _ => 100.0 - 0.5 * i as f64,
        })
        .collect()
}

fn rsi_with(at_10: f64, at_22: f64) -> Vec<Option<f64>> {
    (0..30)
        .map(|i| match i {
            10 => Some(at_10),
            22 => Some(at_22),
            _ => Some(50.0),
        })
        .collect()
}

#[test]
fn swing_lows_respect_the_order_window() {
    let closes = double_dip(90.0, 85.0);
    assert_eq!(swing_points(&closes, SWING_ORDER, true), vec![0, 10, 22]);
}

#[test]
fn lower_price_low_with_higher_rsi_low_is_bullish() {
    let closes = double_dip(90.0, 85.0);
    let rsi = rsi_with(30.0, 40.0);
    let divergence = detect_rsi_divergence(&closes, &rsi, DIVERGENCE_LOOKBACK, SWING_ORDER).unwrap();
    assert_eq!(divergence, RsiDivergence::Bullish);
}

#[test]
fn confirming_rsi_low_is_not_a_divergence() {
    let closes = double_dip(90.0, 85.0);
    let rsi = rsi_with(40.0, 30.0);
    let divergence = detect_rsi_divergence(&closes, &rsi, DIVERGENCE_LOOKBACK, SWING_ORDER).unwrap();
    assert_eq!(divergence, RsiDivergence::None);
}

#[test]
fn higher_price_high_with_lower_rsi_high_is_bearish() {
    let closes = double_top(110.0, 115.0);
    let rsi = rsi_with(70.0, 60.0);
    let divergence = detect_rsi_divergence(&closes, &rsi, DIVERGENCE_LOOKBACK, SWING_ORDER).unwrap();
    assert_eq!(divergence, RsiDivergence::Bearish);
}

#[test]
fn divergence_needs_a_full_window_of_rsi() {
    let closes = double_dip(90.0, 85.0);
    let mut rsi = rsi_with(30.0, 40.0);
    rsi[0] = None;
    let err = detect_rsi_divergence(&closes, &rsi, DIVERGENCE_LOOKBACK, SWING_ORDER).unwrap_err();
    assert_eq!(err.indicator, "rsi_divergence");
    assert_eq!(err.available, 29);
}

fn macd_series_from_diffs(diffs: &[f64]) -> MacdSeries {
    MacdSeries {
        points: diffs
            .iter()
            .map(|d| {
                Some(MacdPoint {
                    macd: 1.0 + d,
                    signal: 1.0,
                    histogram: *d,
                })
            })
            .collect(),
    }
}

#[test]
fn latest_cross_wins_over_an_earlier_one() {
    // golden cross at t-3, death cross at t-1
    let series = macd_series_from_diffs(&[
        -0.5, -0.4, -0.3, -0.2, -0.2, -0.1, -0.1, -0.1, 0.2, 0.1, -0.1, -0.2,
    ]);
    let cross = detect_macd_cross(&series, 10).unwrap();
    assert_eq!(
        cross,
        Some(MacdCross {
            kind: CrossKind::Death,
            bars_ago: 1,
        })
    );
}

#[test]
fn golden_cross_on_latest_bar_is_zero_bars_ago() {
    let series = macd_series_from_diffs(&[-0.3, -0.2, -0.1, 0.0, 0.1]);
    let cross = detect_macd_cross(&series, 10).unwrap().unwrap();
    assert_eq!(cross.kind, CrossKind::Golden);
    assert_eq!(cross.bars_ago, 0);
}

#[test]
fn crosses_outside_the_lookback_are_ignored() {
    let mut diffs = vec![-0.1, 0.1];
    diffs.extend(std::iter::repeat(0.2).take(15));
    let series = macd_series_from_diffs(&diffs);
    assert_eq!(detect_macd_cross(&series, 10).unwrap(), None);
}

#[test]
fn cross_detection_needs_two_points() {
    let series = MacdSeries {
        points: vec![None, None, Some(MacdPoint { macd: 1.0, signal: 0.5, histogram: 0.5 })],
    };
    let err = detect_macd_cross(&series, 10).unwrap_err();
    assert_eq!(err.indicator, "macd_cross");
}

#[test]
fn support_is_the_lowest_recent_low() {
    let mut closes = uptrend_closes(40);
    closes[5] = 10.0; // outside the 20-bar window
    closes[30] = 95.0;
    let bars = bars_from_closes(&closes, as_of());

    let support = recent_support(&bars, 20).unwrap();
    let expected = bars[20..].iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    assert_eq!(support, expected);
    assert!(support > 10.0);
}

#[test]
fn high_52w_needs_a_year_of_bars() {
    let bars = bars_from_closes(&uptrend_closes(TRADING_DAYS_PER_YEAR - 1), as_of());
    assert!(calculate_52_week_high(&bars).is_err());

    let bars = bars_from_closes(&uptrend_closes(TRADING_DAYS_PER_YEAR + 50), as_of());
    let high = calculate_52_week_high(&bars).unwrap();
    let expected = bars[50..].iter().map(|b| b.high).fold(f64::MIN, f64::max);
    assert_eq!(high, expected);
}
