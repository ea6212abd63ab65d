//! Ticker validation

use tickergrade::models::ticker::Ticker;
use tickergrade::EngineError;

#[test]
fn symbols_are_trimmed_and_upper_cased() {
    assert_eq!(Ticker::parse(" aapl ").unwrap().as_str(), "AAPL");
    assert_eq!(Ticker::parse("brk.b").unwrap().to_string(), "BRK.B");
    assert_eq!("rds-a".parse::<Ticker>().unwrap().as_str(), "RDS-A");
}

#[test]
fn malformed_symbols_are_rejected() {
    for raw in ["", "   ", "1ABC", "TOOLONGTICKER", "AA$", "A B", ".X"] {
        let err = Ticker::parse(raw).unwrap_err();
        assert!(
            matches!(err, EngineError::InvalidInput { .. }),
            "{raw:?} gave {err:?}"
        );
    }
}

#[test]
fn ticker_round_trips_through_json_as_a_string() {
    let ticker = Ticker::parse("msft").unwrap();
    let json = serde_json::to_string(&ticker).unwrap();
    assert_eq!(json, "\"MSFT\"");
    assert!(serde_json::from_str::<Ticker>("\"9BAD\"").is_err());
}
