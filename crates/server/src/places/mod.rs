//! Location lookup and nearby facility search over public OSM services

pub mod locator;
pub mod nominatim;
pub mod overpass;

pub use locator::{FacilityLocator, NearbyFacilities};
pub use nominatim::NominatimClient;
pub use overpass::OverpassClient;

use thiserror::Error;

/// Errors from the geocoding and facility-query services
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("Failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl PlacesError {
    fn decode(service: &'static str, err: impl std::fmt::Display) -> Self {
        PlacesError::Decode {
            service,
            message: err.to_string(),
        }
    }
}
