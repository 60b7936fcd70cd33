// Envsense Server - HTTP API
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Routes and handlers.
//!
//! # Routes
//!
//! - `GET /api/sensors` - take a snapshot of every sensor
//! - `GET /api/sensors/:id/history?hours=N` - retained readings of one sensor
//! - `POST /api/query` - keyword answer over a caller-supplied snapshot
//! - `POST /api/analyze` - summary or trend per sensor
//! - `GET /api/health` - health probe
//! - `GET /api/status` - version, uptime and history counters
//! - `GET /metrics` - Prometheus metrics
//! - anything else - static front-end

use crate::error::ApiError;
use crate::metrics;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use envsense::{
    AnalysisMode, AnalysisResult, Fleet, HealthReport, QueryEngine, Reading, SensorSnapshot,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState {
    fleet: RwLock<Fleet>,
    queries: QueryEngine,
    start_time: Instant,
}

impl AppState {
    pub fn new(fleet: Fleet) -> Self {
        Self {
            fleet: RwLock::new(fleet),
            queries: QueryEngine::new(),
            start_time: Instant::now(),
        }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/sensors", get(sensors_handler))
        .route("/sensors/:id/history", get(history_handler))
        .route("/query", post(query_handler))
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .route("/status", get(status_handler));

    Router::new()
        .nest("/api", api)
        .route("/metrics", get(metrics_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Snapshot handler - draws fresh readings for every sensor.
pub async fn sensors_handler(State(state): State<Arc<AppState>>) -> Json<Vec<SensorSnapshot>> {
    let mut fleet = state.fleet.write().await;
    let snapshots = fleet.snapshot();
    metrics::record_snapshot(&snapshots, fleet.history_store());
    Json(snapshots)
}

/// History query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub hours: Option<String>,
}

/// History handler - readings of one sensor within the requested window.
pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    Path(sensor_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let fleet = state.fleet.read().await;

    let hours = match params.hours.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| ApiError::InvalidParameter {
                name: "hours",
                reason: e.to_string(),
            })?,
        None => fleet.config().default_history_hours,
    };

    Ok(Json(fleet.history(&sensor_id, hours)))
}

/// Free-text query body.
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub sensors: Vec<SensorSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// Query handler - answers from the snapshot the caller sent.
pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = payload?;
    let answer = state.queries.respond(&request.query, &request.sensors);
    metrics::record_query(answer.rule);
    tracing::debug!(rule = answer.rule, "answered query");

    Ok(Json(QueryResponse {
        answer: answer.text,
    }))
}

/// Analysis body.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub sensor_ids: Vec<String>,
    #[serde(rename = "type", default)]
    pub mode: Option<String>,
}

/// Analysis handler - per-sensor results, sensors without history omitted.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<BTreeMap<String, AnalysisResult>>, ApiError> {
    let Json(request) = payload?;
    let mode = match request.mode.as_deref() {
        Some(raw) => raw.parse::<AnalysisMode>()?,
        None => AnalysisMode::default(),
    };
    metrics::record_analysis(mode.as_str());

    let fleet = state.fleet.read().await;
    Ok(Json(fleet.analyze(&request.sensor_ids, mode)))
}

/// Health check handler.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.fleet.read().await.health())
}

/// Status information response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub uptime_secs: u64,
    pub sensors: usize,
    pub sensors_tracked: usize,
    pub history_points: usize,
    pub max_history: usize,
}

/// Status handler - returns JSON status information.
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let fleet = state.fleet.read().await;
    let history = fleet.history_store();

    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        sensors: fleet.sensors().len(),
        sensors_tracked: history.tracked_count(),
        history_points: history.total_points(),
        max_history: history.capacity(),
    })
}

/// Metrics handler - returns Prometheus text format.
pub async fn metrics_handler() -> Result<impl IntoResponse, ApiError> {
    let metrics = metrics::encode_metrics()?;
    Ok((
        StatusCode::OK,
        [("Content-Type", "text/plain; charset=utf-8")],
        metrics,
    ))
}
