//! Macro Liquidity pillar and the net-liquidity chart

use tickergrade::models::market::{MacroObservation, MacroSeries};
use tickergrade::models::report::{MacroDetails, PillarDetails, PillarResult, SpreadTrend};
use tickergrade::signals::macro_liquidity::{
    score_macro_with, MacroRules, CHART_POINTS, DEFENSIVE_CEILING, MACRO_RULES,
};
use tickergrade::signals::{net_liquidity_report, net_liquidity_series, score_macro};

use crate::fixtures::{
    as_of, contracting_macro, date, expanding_macro, macro_series, uptrend_bars,
};

fn macro_details(pillar: &PillarResult) -> &MacroDetails {
    match &pillar.details {
        PillarDetails::Macro(d) => d,
        other => panic!("unexpected details {other:?}"),
    }
}

fn obs(date: chrono::NaiveDate, value: f64) -> MacroObservation {
    MacroObservation { date, value }
}

#[test]
fn expanding_liquidity_with_calm_credit_is_risk_on() {
    let series = expanding_macro();
    let pillar = score_macro(Some(&series));
    let d = macro_details(&pillar);

    assert_eq!(pillar.score, 9.0);
    assert_eq!(d.liquidity_expanding, Some(true));
    assert_eq!(d.risk_off, Some(false));
    assert_eq!(d.credit_spread, Some(3.0));
    assert!(!d.defensive_cap_applied);
    assert!(!pillar.degraded());
}

#[test]
fn contracting_liquidity_with_wide_spreads_is_capped() {
    let series = contracting_macro();
    let pillar = score_macro(Some(&series));
    let d = macro_details(&pillar);

    assert!(pillar.score <= DEFENSIVE_CEILING);
    assert_eq!(pillar.score, 1.5);
    assert_eq!(d.liquidity_expanding, Some(false));
    assert_eq!(d.risk_off, Some(true));
    assert_eq!(d.credit_spread_trend, Some(SpreadTrend::Rising));
    assert!(d.defensive_cap_applied);
}

#[test]
fn defensive_ceiling_overrides_softer_penalties() {
    let rules = MacroRules {
        contracting_penalty: 0.0,
        risk_off_penalty: 0.0,
        ..MACRO_RULES
    };
    let pillar = score_macro_with(Some(&contracting_macro()), &rules);

    assert_eq!(pillar.score, DEFENSIVE_CEILING);
    assert!(macro_details(&pillar).defensive_cap_applied);

    let uncapped = MacroRules {
        defensive_ceiling: 10.0,
        ..rules
    };
    assert_eq!(score_macro_with(Some(&contracting_macro()), &uncapped).score, 5.0);
}

#[test]
fn ceiling_ignores_contraction_with_calm_spreads() {
    let rules = MacroRules {
        contracting_penalty: 0.0,
        ..MACRO_RULES
    };
    let series = macro_series(30, -10_000.0, |_| 3.0);
    let pillar = score_macro_with(Some(&series), &rules);

    assert!(!macro_details(&pillar).defensive_cap_applied);
    assert_eq!(pillar.score, 6.5);
}

#[test]
fn rising_spread_below_the_level_trigger_is_still_risk_off() {
    let series = macro_series(30, 10_000.0, |i| 2.0 + i as f64 * 0.05);
    let pillar = score_macro(Some(&series));
    let d = macro_details(&pillar);

    assert_eq!(d.risk_off, Some(true));
    assert!(!d.defensive_cap_applied);
    assert_eq!(pillar.score, 5.5);
}

#[test]
fn missing_spread_scores_liquidity_only() {
    let mut series = expanding_macro();
    series.credit_spread.clear();
    let pillar = score_macro(Some(&series));
    let d = macro_details(&pillar);

    assert_eq!(pillar.score, 7.5);
    assert_eq!(d.risk_off, None);
    assert!(pillar.degraded());
}

#[test]
fn short_or_missing_series_is_neutral() {
    let short = macro_series(10, 10_000.0, |_| 3.0);
    let pillar = score_macro(Some(&short));
    assert_eq!(pillar.score, 5.0);
    assert!(pillar.degraded());
    assert_eq!(macro_details(&pillar).observations, 10);

    let pillar = score_macro(None);
    assert_eq!(pillar.score, 5.0);
    assert!(pillar.degraded());
}

#[test]
fn series_aligns_by_forward_fill() {
    let series = MacroSeries {
        fed_balance_sheet: vec![obs(date(2024, 1, 1), 100.0), obs(date(2024, 1, 3), 110.0)],
        treasury_general_account: vec![obs(date(2024, 1, 2), 20.0)],
        reverse_repo: vec![obs(date(2024, 1, 1), 5.0), obs(date(2024, 1, 4), 1.0)],
        credit_spread: vec![obs(date(2024, 1, 3), 3.5)],
    };
    let points = net_liquidity_series(&series);

    let dates: Vec<_> = points.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]);
    let values: Vec<f64> = points.iter().map(|p| p.net_liquidity).collect();
    assert_eq!(values, vec![75.0, 85.0, 89.0]);
    assert_eq!(points[0].credit_spread, None);
    assert_eq!(points[2].credit_spread, Some(3.5));
}

#[test]
fn report_keeps_the_latest_ninety_rows() {
    let series = macro_series(120, 10_000.0, |_| 3.25);
    let spy = uptrend_bars(900);
    let report = net_liquidity_report(&series, Some(&spy));

    assert_eq!(report.data.len(), CHART_POINTS);
    assert_eq!(report.data.last().unwrap().date, as_of());
    assert_eq!(report.credit_spread, Some(3.25));

    let expected = ((7_500_000.0 + 10_000.0 * 119.0 - 1_150_000.0) / 1_000_000.0 * 100.0_f64).round() / 100.0;
    assert_eq!(report.current_net_liquidity, Some(expected));
    assert!(report.data.iter().all(|r| r.spy_norm.is_some()));
    assert!(report.data.last().unwrap().net_liquidity_norm > 100.0);
}

#[test]
fn report_without_benchmark_omits_overlay() {
    let report = net_liquidity_report(&expanding_macro(), None);
    assert_eq!(report.data.len(), 30);
    assert_eq!(report.data[0].net_liquidity_norm, 100.0);
    assert!(report.data.iter().all(|r| r.spy_price.is_none() && r.spy_norm.is_none()));
}
