//! Nominatim geocoding: place name to coordinates

use serde::Deserialize;
use symptocare_core::{Coordinates, Location};

use super::PlacesError;

const SERVICE: &str = "nominatim";

/// Client for the OpenStreetMap Nominatim `/search` endpoint
#[derive(Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

impl NominatimClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Geocode `query`; `Ok(None)` when nothing matched
    pub async fn geocode(&self, query: &str) -> Result<Option<Location>, PlacesError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| PlacesError::decode(SERVICE, e))?;

        hits.into_iter()
            .next()
            .map(|hit| hit_to_location(hit, query))
            .transpose()
    }
}

fn hit_to_location(hit: SearchHit, query: &str) -> Result<Location, PlacesError> {
    let lat: f64 = hit
        .lat
        .trim()
        .parse()
        .map_err(|e| PlacesError::decode(SERVICE, e))?;
    let lon: f64 = hit
        .lon
        .trim()
        .parse()
        .map_err(|e| PlacesError::decode(SERVICE, e))?;
    let coordinates = Coordinates::new(lat, lon).map_err(|e| PlacesError::decode(SERVICE, e))?;

    Ok(Location {
        coordinates,
        label: hit
            .display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.trim().to_string()),
    })
}
