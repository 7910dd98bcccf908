//! HTML form routes

use axum::{Form, extract::State, response::Html};
use serde::Deserialize;
use symptocare_core::{DEFAULT_LANGUAGE, FacilitySort};

use crate::AppState;
use crate::consult::{Inquiry, consult};
use crate::error::PageError;
use crate::views::{self, ResultView};

/// Fields posted by the symptom form
#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    symptoms: String,
    #[serde(default)]
    city: String,
    #[serde(default = "default_language")]
    language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// GET / - Symptom form
pub async fn home() -> Html<String> {
    Html(views::index_page())
}

/// POST /analyze - Analyze the submitted symptoms and render the result page
pub async fn analyze(
    State(state): State<AppState>,
    Form(form): Form<AnalyzeForm>,
) -> Result<Html<String>, PageError> {
    let inquiry = Inquiry::new(&form.symptoms, &form.city, &form.language)?;
    let report = consult(&state, &inquiry, FacilitySort::Distance).await;

    Ok(Html(views::result_page(&ResultView {
        advice: &report.advice,
        facilities: &report.facilities,
        searched_city: &inquiry.city,
        searched_symptoms: &inquiry.symptoms,
        location_used: &report.location_used,
        selected_language: &inquiry.language,
    })))
}
