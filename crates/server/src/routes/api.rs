//! JSON routes: consultation API and chat widget backend

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use symptocare_core::{DEFAULT_LANGUAGE, FacilitySort};

use crate::AppState;
use crate::consult::{Inquiry, Report, consult};
use crate::error::AppError;

pub const MAX_CHAT_CHARS: usize = 1000;

/// Request body for POST /api/analyze
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    symptoms: String,
    #[serde(default)]
    city: String,
    language: Option<String>,
    /// `distance` (default) or `type`
    sort: Option<String>,
}

/// Request body for chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    message: String,
}

/// Response body for chat
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    reply: String,
}

/// POST /api/analyze - Symptom analysis with nearby facilities as JSON
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Report>, AppError> {
    let Json(body) = payload?;
    let sort: FacilitySort = body.sort.as_deref().unwrap_or_default().parse()?;
    let language = body.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let inquiry = Inquiry::new(&body.symptoms, &body.city, language)?;

    Ok(Json(consult(&state, &inquiry, sort).await))
}

/// POST /chat - One chat turn for the floating assistant widget
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload?;
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".into()));
    }
    if message.chars().count() > MAX_CHAT_CHARS {
        return Err(AppError::BadRequest(format!(
            "Message is limited to {MAX_CHAT_CHARS} characters"
        )));
    }

    tracing::info!(message_len = message.len(), "Chat request");

    let reply = state.advisor.chat(message).await;
    Ok(Json(ChatResponse { reply }))
}
