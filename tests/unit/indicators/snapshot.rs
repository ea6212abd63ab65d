//! Snapshot and chart series

use tickergrade::indicators::{chart_series, compute_snapshot};

use crate::fixtures::{uptrend_bars, uptrend_closes};

#[test]
fn snapshot_of_empty_history_fails() {
    let err = compute_snapshot(&[]).unwrap_err();
    assert_eq!(err.indicator, "price_history");
}

#[test]
fn short_history_surfaces_per_indicator() {
    let bars = uptrend_bars(40);
    let snapshot = compute_snapshot(&bars).unwrap();

    assert!(snapshot.rsi14.is_ok());
    assert!(snapshot.macd.is_ok());
    assert!(snapshot.atr14.is_ok());
    assert_eq!(snapshot.sma50.unwrap_err().indicator, "sma50");
    assert_eq!(snapshot.sma200.unwrap_err().indicator, "sma200");
    assert_eq!(snapshot.high_52w.unwrap_err().indicator, "high_52w");
}

#[test]
fn full_history_defines_every_indicator() {
    let bars = uptrend_bars(300);
    let snapshot = compute_snapshot(&bars).unwrap();
    let last = bars.last().unwrap();

    assert_eq!(snapshot.close, last.close);
    assert_eq!(snapshot.open, last.open);
    assert!(snapshot.sma50.is_ok());
    assert!(snapshot.sma200.is_ok());
    assert!(snapshot.volume_sma20.is_ok());
    assert!(snapshot.high_52w.is_ok());
    assert!(snapshot.divergence.is_ok());
    assert!(snapshot.macd_cross.is_ok());
    assert!(snapshot.support_20 <= last.low);
}

#[test]
fn chart_series_has_one_rounded_row_per_bar() {
    let bars = uptrend_bars(260);
    let chart = chart_series(&bars);

    assert_eq!(chart.len(), bars.len());
    assert_eq!(chart[0].date, bars[0].date);
    assert!(chart[0].rsi.is_none());
    assert!(chart[0].sma50.is_none());
    assert!(chart[259].sma200.is_some());

    let closes = uptrend_closes(260);
    let price = chart[259].price;
    assert_eq!(price, (closes[259] * 100.0).round() / 100.0);
}
