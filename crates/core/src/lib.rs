//! symptocare-core: Domain types and text handling for the symptom assistant
//!
//! This crate has no I/O. It builds the prompts sent to the AI provider,
//! parses replies into [`HealthAdvice`], and orders nearby facilities.

pub mod advice;
pub mod error;
pub mod facility;
pub mod geo;
pub mod language;
pub mod outcome;
pub mod prompt;

pub use advice::{HealthAdvice, parse_advice};
pub use error::CoreError;
pub use facility::{Facility, FacilityKind, FacilitySort, dedupe_facilities, sort_facilities};
pub use geo::{Coordinates, Location, haversine_km};
pub use language::{DEFAULT_LANGUAGE, language_name};
pub use outcome::{ErrorBody, ErrorKind};
