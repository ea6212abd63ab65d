//! Test utilities for API server and scanner integration tests

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use tickergrade::config::AppConfig;
use tickergrade::core::{create_router, AnalysisService, AppState, ScannerBatchRunner};
use tickergrade::metrics::Metrics;
use tickergrade::store::InMemoryStagingStore;

use crate::fixtures::{downtrend_bars, uptrend_bars, FakeProvider};

pub const HISTORY_BARS: usize = 300;

/// Bearish sources with price history for a handful of liquid names and the benchmark
pub fn market() -> FakeProvider {
    FakeProvider::bearish()
        .with_ticker("AAPL", uptrend_bars(HISTORY_BARS))
        .with_ticker("MSFT", downtrend_bars(HISTORY_BARS))
        .with_ticker("NVDA", uptrend_bars(HISTORY_BARS))
        .with_ticker("AMD", downtrend_bars(HISTORY_BARS))
        .with_ticker("SPY", uptrend_bars(HISTORY_BARS))
}

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub store: Arc<InMemoryStagingStore>,
}

impl TestApiServer {
    pub fn new(provider: FakeProvider) -> Self {
        Self::with_config(provider, AppConfig::default())
    }

    pub fn with_config(provider: FakeProvider, config: AppConfig) -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let store = Arc::new(InMemoryStagingStore::new());
        let state = AppState::new(&config, Arc::new(provider), store.clone(), metrics.clone());

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            store,
        }
    }
}

/// Scanner wired to its own store and metrics
pub fn scanner(provider: FakeProvider, concurrency: usize) -> (ScannerBatchRunner, Arc<InMemoryStagingStore>, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let store = Arc::new(InMemoryStagingStore::new());
    let analysis = AnalysisService::new(Arc::new(provider), metrics.clone(), Duration::from_secs(5));
    let runner = ScannerBatchRunner::new(analysis, store.clone(), metrics.clone(), concurrency);
    (runner, store, metrics)
}
