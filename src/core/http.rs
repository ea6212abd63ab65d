//! HTTP API using Axum

use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::AppConfig;
use crate::core::analyzer::AnalysisService;
use crate::core::scanner::{ScanSummary, ScannerBatchRunner};
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::report::ScoreReport;
use crate::models::staging::{StagingCandidate, TradeIdea};
use crate::services::market_data::MarketDataProvider;
use crate::signals::NetLiquidityReport;
use crate::store::{StagingStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analysis: AnalysisService,
    pub scanner: Arc<ScannerBatchRunner>,
    pub store: Arc<dyn StagingStore>,
    pub watchlist: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        provider: Arc<dyn MarketDataProvider>,
        store: Arc<dyn StagingStore>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let analysis = AnalysisService::new(provider, metrics.clone(), config.request_deadline);
        let scanner = Arc::new(ScannerBatchRunner::new(
            analysis.clone(),
            store.clone(),
            metrics.clone(),
            config.scanner_concurrency,
        ));
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            analysis,
            scanner,
            store,
            watchlist: Arc::new(config.watchlist.clone()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

impl EngineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            EngineError::TickerNotFound { .. } => StatusCode::NOT_FOUND,
            EngineError::Store(StoreError::CandidateNotFound(_)) => StatusCode::NOT_FOUND,
            EngineError::DataUnavailable { .. } => StatusCode::BAD_GATEWAY,
            EngineError::DeadlineExceeded { .. } => StatusCode::GATEWAY_TIMEOUT,
            EngineError::InsufficientHistory(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::InternalComputation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, status = %status, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "tickergrade-api"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Evaluation date override, defaults to today (UTC)
#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<NaiveDate>,
}

impl AsOfQuery {
    fn resolve(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

async fn analyze_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<ScoreReport>, EngineError> {
    let report = state.analysis.analyze(&ticker, query.resolve()).await?;
    Ok(Json(report))
}

async fn net_liquidity(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<NetLiquidityReport>, EngineError> {
    let report = state.analysis.net_liquidity(query.resolve()).await?;
    Ok(Json(report))
}

type JsonError = (StatusCode, Json<Value>);

fn bad_request(message: String) -> JsonError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// An empty body yields the default request; malformed JSON is a 400 with an `error` field
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes, what: &str) -> Result<T, JsonError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| bad_request(format!("invalid {what}: {e}")))
}

#[derive(Debug, Default, Deserialize)]
struct ScanRequest {
    #[serde(default)]
    tickers: Option<Vec<String>>,
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

/// Scan the configured watchlist, or the tickers in the request body
async fn run_scanner(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScanSummary>, JsonError> {
    let request: ScanRequest = parse_body(&body, "scan request")?;

    let watchlist = request
        .tickers
        .unwrap_or_else(|| state.watchlist.as_ref().clone());
    if watchlist.is_empty() {
        return Err(bad_request("watchlist is empty".to_string()));
    }

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let summary = state.scanner.run(&watchlist, as_of).await;
    Ok(Json(summary))
}

async fn list_staging(State(state): State<AppState>) -> Result<Json<Vec<StagingCandidate>>, EngineError> {
    Ok(Json(state.store.list_candidates().await?))
}

#[derive(Debug, Default, Deserialize)]
struct PublishRequest {
    #[serde(default)]
    admin_comment: String,
}

async fn publish_candidate(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<Json<TradeIdea>, Response> {
    let request: PublishRequest =
        parse_body(&body, "publish request").map_err(IntoResponse::into_response)?;
    let idea = state
        .store
        .publish(id, &request.admin_comment, Utc::now())
        .await
        .map_err(|e| EngineError::from(e).into_response())?;
    Ok(Json(idea))
}

async fn discard_candidate(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, EngineError> {
    let removed = state.store.discard(id).await?;
    Ok(Json(json!({ "discarded": removed.id, "ticker": removed.ticker })))
}

async fn list_trade_ideas(State(state): State<AppState>) -> Result<Json<Vec<TradeIdea>>, EngineError> {
    Ok(Json(state.store.trade_ideas().await?))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/analyze/{ticker}", get(analyze_ticker))
        .route("/api/macro/net-liquidity", get(net_liquidity))
        .route("/api/admin/scanner/run", post(run_scanner))
        .route("/api/admin/staging", get(list_staging))
        .route("/api/admin/staging/{id}/publish", post(publish_candidate))
        .route("/api/admin/staging/{id}/discard", post(discard_candidate))
        .route("/api/trade-ideas", get(list_trade_ideas))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!("Metrics endpoint available at http://0.0.0.0:{}/metrics", port);
    axum::serve(listener, app).await?;

    Ok(())
}
