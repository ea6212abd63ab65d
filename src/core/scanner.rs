//! Watchlist scans that stage candidates for review

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::core::analyzer::AnalysisService;
use crate::error::EngineResult;
use crate::metrics::Metrics;
use crate::models::report::ScoreReport;
use crate::models::staging::Direction;
use crate::signals::categories::{ThresholdTable, THRESHOLDS};
use crate::store::StagingStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanSummary {
    pub scanned: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Which staging bucket a finished report belongs to, if any
pub fn staging_direction(report: &ScoreReport, thresholds: &ThresholdTable) -> Option<Direction> {
    if report.blackout() {
        return None;
    }
    match thresholds.direction(report.final_score) {
        Direction::Neutral => None,
        direction => Some(direction),
    }
}

/// Upper-cases and drops repeated tickers, keeping first-seen order
pub fn dedupe_watchlist(watchlist: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(watchlist.len());
    for ticker in watchlist {
        let ticker = ticker.trim().to_uppercase();
        if !ticker.is_empty() && !out.contains(&ticker) {
            out.push(ticker);
        }
    }
    out
}

pub struct ScannerBatchRunner {
    analysis: AnalysisService,
    store: Arc<dyn StagingStore>,
    metrics: Arc<Metrics>,
    concurrency: usize,
}

impl ScannerBatchRunner {
    pub fn new(
        analysis: AnalysisService,
        store: Arc<dyn StagingStore>,
        metrics: Arc<Metrics>,
        concurrency: usize,
    ) -> Self {
        Self {
            analysis,
            store,
            metrics,
            concurrency: concurrency.max(1),
        }
    }

    /// Evaluate every ticker, at most `concurrency` at a time.
    ///
    /// Per-ticker failures are recorded in the summary and never abort the batch.
    pub async fn run(&self, watchlist: &[String], as_of: NaiveDate) -> ScanSummary {
        let tickers = dedupe_watchlist(watchlist);
        info!(tickers = tickers.len(), %as_of, "Starting watchlist scan");
        self.metrics.scanner_runs_total.inc();

        let mut outcomes = stream::iter(tickers)
            .map(|ticker| async move {
                let result = self.analysis.analyze(&ticker, as_of).await;
                (ticker, result)
            })
            .buffered(self.concurrency);

        let mut summary = ScanSummary::default();
        while let Some((ticker, result)) = outcomes.next().await {
            match self.stage(result).await {
                Ok(direction) => {
                    summary.scanned += 1;
                    match direction {
                        Some(d) if d.is_bullish() => summary.bullish += 1,
                        Some(Direction::Bearish) => summary.bearish += 1,
                        _ => {}
                    }
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "Scanner skipped ticker");
                    summary.failed += 1;
                    summary.errors.push(format!("{ticker}: {e}"));
                }
            }
        }

        info!(
            scanned = summary.scanned,
            bullish = summary.bullish,
            bearish = summary.bearish,
            failed = summary.failed,
            "Watchlist scan complete"
        );
        summary
    }

    async fn stage(&self, result: EngineResult<ScoreReport>) -> EngineResult<Option<Direction>> {
        let report = result?;
        let Some(direction) = staging_direction(&report, &THRESHOLDS) else {
            return Ok(None);
        };
        self.store
            .upsert_candidate(&report.ticker, report.final_score, direction, Utc::now())
            .await?;
        Ok(Some(direction))
    }
}
