//! TickerGrade API Server
//!
//! Serves single-ticker analyses, the macro liquidity chart and the admin
//! scanner endpoints. Scheduled scans run in-process when `SCAN_CRON` is set.

use std::sync::Arc;

use dotenvy::dotenv;
use tickergrade::config::{get_environment, AppConfig};
use tickergrade::core::{start_server, AppState, ScanScheduler};
use tickergrade::logging;
use tickergrade::metrics::Metrics;
use tickergrade::services::{HttpFetcher, HttpMarketDataProvider};
use tickergrade::store::InMemoryStagingStore;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env();
    info!("Starting TickerGrade API Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    for (name, endpoint) in [
        ("MarketData.app", &config.marketdata),
        ("Finnhub", &config.finnhub),
        ("FRED", &config.fred),
    ] {
        if endpoint.api_key.is_none() {
            warn!(provider = name, "No API key configured, requests may fail");
        }
    }

    let metrics = Arc::new(Metrics::new()?);
    let fetcher = HttpFetcher::new(config.retry).with_retry_counter(metrics.provider_retries_total.clone());
    let provider = Arc::new(HttpMarketDataProvider::from_config(&config, fetcher));
    let store = Arc::new(InMemoryStagingStore::new());
    let state = AppState::new(&config, provider, store, metrics);

    let scheduler = match &config.scan_cron {
        Some(expr) => match ScanScheduler::new(state.scanner.clone(), config.watchlist.clone(), expr) {
            Ok(scheduler) => {
                scheduler.start().await;
                Some(scheduler)
            }
            Err(e) => {
                warn!(error = %e, "Scheduled scans disabled");
                None
            }
        },
        None => None,
    };

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    info!("API server stopped");

    Ok(())
}
