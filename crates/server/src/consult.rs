//! One symptom consultation: AI advice and nearby facilities, fetched concurrently

use serde::Serialize;
use symptocare_core::advice::HealthAdvice;
use symptocare_core::{Facility, FacilitySort};

use crate::AppState;
use crate::error::AppError;

pub const MAX_SYMPTOMS_CHARS: usize = 2000;
pub const MAX_CITY_CHARS: usize = 120;

/// Everything the result page and the JSON API show
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub advice: HealthAdvice,
    pub ai_available: bool,
    pub location_used: String,
    pub used_default_location: bool,
    pub facilities: Vec<Facility>,
}

/// Validated consultation input
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub symptoms: String,
    pub city: String,
    pub language: String,
}

impl Inquiry {
    pub fn new(symptoms: &str, city: &str, language: &str) -> Result<Self, AppError> {
        let symptoms = symptoms.trim();
        let city = city.trim();

        if symptoms.is_empty() {
            return Err(AppError::BadRequest("Please describe your symptoms.".into()));
        }
        if symptoms.chars().count() > MAX_SYMPTOMS_CHARS {
            return Err(AppError::BadRequest(format!(
                "Symptom description is limited to {MAX_SYMPTOMS_CHARS} characters."
            )));
        }
        if city.chars().count() > MAX_CITY_CHARS {
            return Err(AppError::BadRequest(format!(
                "City name is limited to {MAX_CITY_CHARS} characters."
            )));
        }

        Ok(Self {
            symptoms: symptoms.to_string(),
            city: city.to_string(),
            language: language.trim().to_string(),
        })
    }
}

/// Run the AI analysis and the facility search side by side
pub async fn consult(state: &AppState, inquiry: &Inquiry, sort: FacilitySort) -> Report {
    tracing::info!(
        city = %inquiry.city,
        language = %inquiry.language,
        symptoms_len = inquiry.symptoms.len(),
        "Consultation request"
    );

    let (consultation, nearby) = tokio::join!(
        state.advisor.analyze(&inquiry.symptoms, &inquiry.language),
        state.locator.locate(&inquiry.city, sort),
    );

    Report {
        advice: consultation.advice,
        ai_available: consultation.ai_available,
        location_used: nearby.location.label,
        used_default_location: nearby.used_default,
        facilities: nearby.facilities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_trims_fields() {
        let inquiry = Inquiry::new("  cough \n", " Pune ", " hi-IN ").unwrap();
        assert_eq!(inquiry.symptoms, "cough");
        assert_eq!(inquiry.city, "Pune");
        assert_eq!(inquiry.language, "hi-IN");
    }

    #[test]
    fn test_inquiry_rejects_blank_symptoms() {
        assert!(matches!(
            Inquiry::new(" \t", "Pune", "en-US"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_inquiry_rejects_oversized_input() {
        let long = "a".repeat(MAX_SYMPTOMS_CHARS + 1);
        assert!(Inquiry::new(&long, "", "en-US").is_err());

        let city = "c".repeat(MAX_CITY_CHARS + 1);
        assert!(Inquiry::new("cough", &city, "en-US").is_err());
    }

    #[test]
    fn test_inquiry_allows_empty_city() {
        assert!(Inquiry::new("cough", "", "").is_ok());
    }
}
