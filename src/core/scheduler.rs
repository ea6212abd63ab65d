//! Cron-driven watchlist scans, run in-process

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use cron::Schedule;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::core::scanner::ScannerBatchRunner;

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },

    #[error("scheduled scans need a non-empty watchlist")]
    EmptyWatchlist,
}

/// Runs the scanner over a fixed watchlist on every cron tick
pub struct ScanScheduler {
    runner: Arc<ScannerBatchRunner>,
    watchlist: Vec<String>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// `cron_expr` uses the six-field form with seconds (`0 30 21 * * Mon-Fri`)
    pub fn new(
        runner: Arc<ScannerBatchRunner>,
        watchlist: Vec<String>,
        cron_expr: &str,
    ) -> Result<Self, SchedulerError> {
        if watchlist.is_empty() {
            return Err(SchedulerError::EmptyWatchlist);
        }
        let schedule = Schedule::from_str(cron_expr).map_err(|e| SchedulerError::InvalidCron {
            expr: cron_expr.to_string(),
            reason: e.to_string(),
        })?;

        info!(cron = %cron_expr, tickers = watchlist.len(), "ScanScheduler: created");

        Ok(Self {
            runner,
            watchlist,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub async fn start(&self) {
        let runner = self.runner.clone();
        let watchlist = self.watchlist.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            loop {
                let Some(next_tick) = schedule.upcoming(Utc).next() else {
                    warn!("ScanScheduler: schedule has no upcoming ticks, stopping");
                    break;
                };
                let wait = (next_tick - Utc::now()).to_std().unwrap_or_default();
                tokio::time::sleep(wait).await;

                let as_of = Utc::now().date_naive();
                let summary = runner.run(&watchlist, as_of).await;
                info!(
                    scanned = summary.scanned,
                    bullish = summary.bullish,
                    bearish = summary.bearish,
                    failed = summary.failed,
                    "ScanScheduler: scheduled scan finished"
                );
            }
        });

        *self.handle.write().await = Some(handle);
        info!("ScanScheduler: started");
    }

    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
