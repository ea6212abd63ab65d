//! Average true range

use tickergrade::indicators::{calculate_atr, calculate_atr_default, ATR_PERIOD};
use tickergrade::models::market::PriceBar;

use crate::fixtures::as_of;

fn ranged_bars(n: usize, range: f64) -> Vec<PriceBar> {
    (0..n)
        .map(|i| {
            let date = as_of() - chrono::Duration::days((n - 1 - i) as i64);
            PriceBar::new(date, 100.0, 100.0 + range / 2.0, 100.0 - range / 2.0, 100.0, 1_000.0)
        })
        .collect()
}

#[test]
fn atr_of_constant_range_equals_that_range() {
    let bars = ranged_bars(30, 2.0);
    assert!((calculate_atr_default(&bars).unwrap() - 2.0).abs() < 1e-12);
}

#[test]
fn atr_counts_gaps_from_previous_close() {
    let mut bars = ranged_bars(ATR_PERIOD + 1, 2.0);
    // gap up on the last bar: previous close 100, low 109, high 111
    let last = bars.last_mut().unwrap();
    last.open = 110.0;
    last.high = 111.0;
    last.low = 109.0;
    last.close = 110.0;

    let atr = calculate_atr(&bars, ATR_PERIOD).unwrap();
    let expected = (2.0 * 13.0 + 11.0) / 14.0;
    assert!((atr - expected).abs() < 1e-12, "atr = {atr}");
}

#[test]
fn atr_needs_one_bar_more_than_its_period() {
    let bars = ranged_bars(ATR_PERIOD, 2.0);
    let err = calculate_atr_default(&bars).unwrap_err();
    assert_eq!(err.indicator, "atr");
    assert_eq!(err.required, ATR_PERIOD + 1);
}
