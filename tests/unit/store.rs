//! In-memory staging store

use chrono::{Duration, TimeZone, Utc};
use tickergrade::models::staging::Direction;
use tickergrade::store::{InMemoryStagingStore, StagingStore, StoreError};

#[tokio::test]
async fn restaging_a_ticker_keeps_its_id() {
    let store = InMemoryStagingStore::new();
    let t0 = Utc.with_ymd_and_hms(2024, 6, 3, 21, 30, 0).unwrap();

    let first = store.upsert_candidate("AAPL", 7.1, Direction::Bullish, t0).await.unwrap();
    let second = store
        .upsert_candidate("AAPL", 8.7, Direction::StrongBullish, t0 + Duration::days(1))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    let candidates = store.list_candidates().await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].score, 8.7);
    assert_eq!(candidates[0].direction, Direction::StrongBullish);
}

#[tokio::test]
async fn candidates_are_listed_by_ticker() {
    let store = InMemoryStagingStore::new();
    let now = Utc::now();
    for ticker in ["NVDA", "AAPL", "MSFT"] {
        store.upsert_candidate(ticker, 4.0, Direction::Bearish, now).await.unwrap();
    }
    let tickers: Vec<String> = store
        .list_candidates()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.ticker)
        .collect();
    assert_eq!(tickers, vec!["AAPL", "MSFT", "NVDA"]);
}

#[tokio::test]
async fn publishing_moves_a_candidate_to_trade_ideas() {
    let store = InMemoryStagingStore::new();
    let now = Utc::now();
    let candidate = store.upsert_candidate("AMD", 7.4, Direction::Bullish, now).await.unwrap();

    let idea = store.publish(candidate.id, "  Breakout confirmed ", now).await.unwrap();
    assert_eq!(idea.ticker, "AMD");
    assert_eq!(idea.admin_comment, "Breakout confirmed");
    assert!(idea.active);
    assert!(idea.thesis.contains("7.4/10"));

    assert!(store.list_candidates().await.unwrap().is_empty());
    assert_eq!(
        store.get_candidate(candidate.id).await.unwrap_err(),
        StoreError::CandidateNotFound(candidate.id)
    );
    assert_eq!(store.trade_ideas().await.unwrap(), vec![idea]);
}

#[tokio::test]
async fn trade_ideas_are_newest_first() {
    let store = InMemoryStagingStore::new();
    let t0 = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    let a = store.upsert_candidate("AAA", 7.0, Direction::Bullish, t0).await.unwrap();
    let b = store.upsert_candidate("BBB", 3.0, Direction::Bearish, t0).await.unwrap();

    store.publish(a.id, "", t0).await.unwrap();
    store.publish(b.id, "", t0 + Duration::hours(1)).await.unwrap();

    let tickers: Vec<String> = store.trade_ideas().await.unwrap().into_iter().map(|i| i.ticker).collect();
    assert_eq!(tickers, vec!["BBB", "AAA"]);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let store = InMemoryStagingStore::new();
    assert_eq!(store.discard(42).await.unwrap_err(), StoreError::CandidateNotFound(42));
    assert_eq!(
        store.publish(42, "", Utc::now()).await.unwrap_err(),
        StoreError::CandidateNotFound(42)
    );
}

#[tokio::test]
async fn discarding_removes_only_that_candidate() {
    let store = InMemoryStagingStore::new();
    let now = Utc::now();
    let keep = store.upsert_candidate("KEEP", 7.0, Direction::Bullish, now).await.unwrap();
    let drop = store.upsert_candidate("DROP", 3.0, Direction::Bearish, now).await.unwrap();

    let removed = store.discard(drop.id).await.unwrap();
    assert_eq!(removed.ticker, "DROP");
    assert_eq!(store.list_candidates().await.unwrap(), vec![keep]);
    assert!(store.trade_ideas().await.unwrap().is_empty());
}
