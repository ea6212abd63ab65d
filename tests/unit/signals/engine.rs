//! End-to-end evaluation over fixture data

use tickergrade::models::report::{PillarDetails, ValuationMetric, VerdictType};
use tickergrade::models::ticker::Ticker;
use tickergrade::signals::{SignalEngine, ThresholdTable};
use tickergrade::EngineError;

use crate::fixtures::{
    as_of, blackout_sources, bullish_sources, downtrend_bars, uptrend_bars, with_prices,
};

fn ticker() -> Ticker {
    Ticker::parse("FIX").unwrap()
}

#[test]
fn identical_inputs_serialise_identically() {
    let bars = uptrend_bars(300);
    let data = with_prices(bullish_sources(bars.last().unwrap().close), bars);

    let first = SignalEngine::evaluate(&ticker(), &data, as_of()).unwrap();
    let second = SignalEngine::evaluate(&ticker(), &data, as_of()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn report_carries_all_five_pillars() {
    let bars = uptrend_bars(300);
    let data = with_prices(bullish_sources(bars.last().unwrap().close), bars);
    let report = SignalEngine::evaluate(&ticker(), &data, as_of()).unwrap();

    assert_eq!(report.ticker, "FIX");
    assert_eq!(report.company_name, "Fixture Corp");
    assert_eq!(report.thresholds_version, "v2-5pillar");
    assert_eq!(report.pillars.total_weight(), 100.0);
    assert!((0.0..=10.0).contains(&report.final_score));
    assert_eq!(report.price_history.len(), 300);

    let json = serde_json::to_value(&report).unwrap();
    for key in ["catalysts", "technicals", "value", "macro", "event_risk"] {
        assert!(json["pillars"][key]["score"].is_number(), "pillar {key}");
    }
    assert_eq!(json["pillars"]["event_risk"]["details"]["blackout"], false);
}

#[test]
fn blackout_forces_wait_and_drops_the_setup() {
    let bars = uptrend_bars(300);
    let data = with_prices(blackout_sources(bars.last().unwrap().close), bars);
    let report = SignalEngine::evaluate(&ticker(), &data, as_of()).unwrap();

    assert!(report.blackout());
    assert_eq!(report.verdict, "WAIT (Earnings)");
    assert_eq!(report.verdict_type, VerdictType::Warning);
    assert!(report.trade_setup.is_none());
    assert_eq!(report.pillars.event_risk.score, 0.0);
}

#[test]
fn threshold_table_controls_the_setup() {
    let permissive = ThresholdTable {
        version: "test-permissive",
        strong_buy: 0.0,
        buy: 0.0,
        hold: 0.0,
    };
    let bars = downtrend_bars(300);
    let data = with_prices(bullish_sources(bars.last().unwrap().close), bars);
    let report = SignalEngine::evaluate_with(&ticker(), &data, as_of(), &permissive).unwrap();

    assert_eq!(report.thresholds_version, "test-permissive");
    assert_eq!(report.verdict, "Strong Buy");
    let setup = report.trade_setup.expect("setup offered at every score");
    assert!(setup.stop < setup.entry);
    assert!(setup.target > setup.entry);
}

#[test]
fn missing_optional_sources_degrade_only_their_pillars() {
    let bars = uptrend_bars(300);
    let data = with_prices(Default::default(), bars);
    let report = SignalEngine::evaluate(&ticker(), &data, as_of()).unwrap();

    assert_eq!(report.company_name, "FIX");
    assert!(report.pillars.catalysts.degraded());
    assert!(report.pillars.value.degraded());
    assert!(report.pillars.macro_liquidity.degraded());
    assert!(report.pillars.event_risk.degraded());
    assert!(!report.pillars.technicals.degraded());
    assert_eq!(report.pillars.catalysts.score, 5.0);
    assert_eq!(report.pillars.event_risk.score, 5.0);
}

#[test]
fn price_to_sales_used_when_peg_missing() {
    let bars = uptrend_bars(300);
    let mut sources = bullish_sources(bars.last().unwrap().close);
    if let Some(f) = sources.fundamentals.as_mut() {
        f.peg_ratio = None;
    }
    let report = SignalEngine::evaluate(&ticker(), &with_prices(sources, bars), as_of()).unwrap();

    let PillarDetails::Value(value) = &report.pillars.value.details else {
        panic!("value details expected");
    };
    assert_eq!(value.valuation_metric, ValuationMetric::PriceToSales);
}

#[test]
fn empty_history_is_insufficient() {
    let data = with_prices(bullish_sources(100.0), Vec::new());
    let err = SignalEngine::evaluate(&ticker(), &data, as_of()).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientHistory(_)));
}
