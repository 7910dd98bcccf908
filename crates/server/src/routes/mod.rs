pub mod api;
pub mod ops;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

/// Build the symptom assistant routes
pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/analyze", post(pages::analyze))
        .route("/api/analyze", post(api::analyze))
        .route("/chat", post(api::chat))
        .route("/static/assistant.js", get(ops::assistant_js))
}
