//! Operational endpoints: health, metrics, static assets, fallback

use axum::{
    Extension, Json,
    extract::State,
    http::{Uri, header},
    response::IntoResponse,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::AppState;
use crate::error::AppError;

const ASSISTANT_JS: &str = include_str!("../../static/assistant.js");

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    ai_providers: usize,
}

/// GET /health - Liveness plus the number of configured AI providers
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        ai_providers: state.advisor.providers(),
    })
}

/// GET /metrics - Render collected metrics in Prometheus text format
pub async fn metrics(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}

/// GET /static/assistant.js
pub async fn assistant_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        ASSISTANT_JS,
    )
}

/// Any unmatched route
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
