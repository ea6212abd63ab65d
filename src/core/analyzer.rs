//! Request-level orchestration: validate, acquire under a deadline, evaluate

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::metrics::Metrics;
use crate::models::report::ScoreReport;
use crate::models::ticker::Ticker;
use crate::services::acquire;
use crate::services::fred::MACRO_WINDOW_DAYS;
use crate::services::market_data::MarketDataProvider;
use crate::signals::{net_liquidity_report, NetLiquidityReport, SignalEngine};

/// Benchmark overlaid on the net-liquidity chart
pub const BENCHMARK_TICKER: &str = "SPY";

#[derive(Clone)]
pub struct AnalysisService {
    provider: Arc<dyn MarketDataProvider>,
    metrics: Arc<Metrics>,
    deadline: Duration,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, metrics: Arc<Metrics>, deadline: Duration) -> Self {
        Self {
            provider,
            metrics,
            deadline,
        }
    }

    /// Full pipeline for one ticker.
    ///
    /// The symbol is validated before any fetch. When the deadline expires the
    /// in-flight fetches are dropped and `DeadlineExceeded` is returned.
    pub async fn analyze(&self, raw_ticker: &str, as_of: NaiveDate) -> EngineResult<ScoreReport> {
        let ticker = Ticker::parse(raw_ticker)?;
        let timer = self.metrics.analysis_duration_seconds.start_timer();

        let result = match tokio::time::timeout(self.deadline, self.evaluate(&ticker, as_of)).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::DeadlineExceeded {
                ticker: ticker.to_string(),
                after: self.deadline,
            }),
        };
        timer.observe_duration();

        match &result {
            Ok(report) => {
                self.metrics.analyses_total.inc();
                info!(
                    ticker = %ticker,
                    final_score = report.final_score,
                    verdict = %report.verdict,
                    "Analysis complete"
                );
            }
            Err(e) => {
                self.metrics.analysis_failures_total.inc();
                warn!(ticker = %ticker, error = %e, "Analysis failed");
            }
        }
        result
    }

    async fn evaluate(&self, ticker: &Ticker, as_of: NaiveDate) -> EngineResult<ScoreReport> {
        let data = acquire(self.provider.as_ref(), ticker, as_of).await?;
        SignalEngine::evaluate(ticker, &data, as_of)
    }

    /// Net-liquidity chart with the benchmark overlay; the overlay is best-effort
    pub async fn net_liquidity(&self, as_of: NaiveDate) -> EngineResult<NetLiquidityReport> {
        let benchmark = Ticker::parse(BENCHMARK_TICKER)?;
        let from = as_of - chrono::Duration::days(MACRO_WINDOW_DAYS);

        let fetch = async {
            tokio::join!(
                self.provider.macro_series(as_of),
                self.provider.price_history(&benchmark, from, as_of),
            )
        };
        let (macro_series, benchmark_bars) = tokio::time::timeout(self.deadline, fetch)
            .await
            .map_err(|_| EngineError::DeadlineExceeded {
                ticker: BENCHMARK_TICKER.to_string(),
                after: self.deadline,
            })?;

        let macro_series = macro_series.map_err(|e| EngineError::DataUnavailable {
            ticker: "macro".to_string(),
            reason: e.to_string(),
        })?;
        let benchmark_bars = benchmark_bars
            .map_err(|e| warn!(error = %e, "Benchmark prices unavailable, chart without overlay"))
            .ok();

        Ok(net_liquidity_report(&macro_series, benchmark_bars.as_deref()))
    }
}
