use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
