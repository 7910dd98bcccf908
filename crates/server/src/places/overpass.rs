//! Overpass API queries for medical facilities around a point

use serde::Deserialize;
use std::collections::HashMap;
use symptocare_core::{Coordinates, Facility, FacilityKind};

use super::PlacesError;

const SERVICE: &str = "overpass";

/// Client for an Overpass API interpreter endpoint
#[derive(Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

/// Node, way or relation. Ways and relations carry `center` under `out center`.
#[derive(Debug, Deserialize)]
struct Element {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Center>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

impl OverpassClient {
    pub fn new(http: reqwest::Client, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }

    /// Named hospitals, clinics and doctors within `radius_m` metres. `distance_km` is not set.
    pub async fn facilities(
        &self,
        around: Coordinates,
        radius_m: u32,
    ) -> Result<Vec<Facility>, PlacesError> {
        let query = build_query(around, radius_m);

        let response = self
            .http
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body: OverpassResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::decode(SERVICE, e))?;

        Ok(body.elements.into_iter().filter_map(to_facility).collect())
    }
}

/// Overpass QL for medical amenities around a point
pub fn build_query(around: Coordinates, radius_m: u32) -> String {
    let filter = format!("(around:{radius_m},{},{})", around.lat, around.lon);
    format!(
        r#"[out:json][timeout:25];
(
  nwr["amenity"~"^(hospital|clinic|doctors)$"]{filter};
  nwr["healthcare"~"^(hospital|clinic|doctor)$"]{filter};
);
out center tags;"#
    )
}

fn to_facility(element: Element) -> Option<Facility> {
    let name = element
        .tags
        .get("name")
        .or_else(|| element.tags.get("name:en"))
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())?
        .to_string();

    let (lat, lon) = match (element.lat, element.lon, &element.center) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(center)) => (center.lat, center.lon),
        _ => return None,
    };
    let coordinates = Coordinates::new(lat, lon).ok()?;

    let kind = element
        .tags
        .get("amenity")
        .map(|v| FacilityKind::from_osm(v))
        .filter(|k| *k != FacilityKind::Other)
        .or_else(|| element.tags.get("healthcare").map(|v| FacilityKind::from_osm(v)))
        .unwrap_or(FacilityKind::Other);

    let mut facility = Facility::new(name, kind, coordinates);
    facility.address = address(&element.tags);
    facility.phone = first_tag(&element.tags, &["phone", "contact:phone"]);
    facility.website = first_tag(&element.tags, &["website", "contact:website"]);
    facility.opening_hours = first_tag(&element.tags, &["opening_hours"]);
    Some(facility)
}

fn first_tag(tags: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| tags.get(*k))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(String::from)
}

/// Compose a one-line address from `addr:*` tags
fn address(tags: &HashMap<String, String>) -> Option<String> {
    if let Some(full) = tags.get("addr:full").filter(|v| !v.trim().is_empty()) {
        return Some(full.trim().to_string());
    }

    let get = |k: &str| tags.get(k).map(|v| v.trim()).filter(|v| !v.is_empty());

    let street = match (get("addr:housenumber"), get("addr:street")) {
        (Some(number), Some(street)) => Some(format!("{number} {street}")),
        (None, Some(street)) => Some(street.to_string()),
        _ => None,
    };

    let parts: Vec<String> = [
        street,
        get("addr:city").map(String::from),
        get("addr:postcode").map(String::from),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Vec<Facility> {
        let response: OverpassResponse = serde_json::from_value(value).unwrap();
        response.elements.into_iter().filter_map(to_facility).collect()
    }

    #[test]
    fn test_query_embeds_radius_and_point() {
        let q = build_query(Coordinates { lat: 12.5, lon: 77.25 }, 3000);
        assert!(q.contains(r#"nwr["amenity"~"^(hospital|clinic|doctors)$"](around:3000,12.5,77.25);"#));
        assert!(q.ends_with("out center tags;"));
    }

    #[test]
    fn test_nodes_and_way_centers() {
        let facilities = parse(json!({
            "elements": [
                {"type": "node", "id": 1, "lat": 10.0, "lon": 20.0,
                 "tags": {"amenity": "clinic", "name": "Care Clinic", "phone": "+91 1234"}},
                {"type": "way", "id": 2, "center": {"lat": 10.5, "lon": 20.5},
                 "tags": {"amenity": "hospital", "name": "General Hospital",
                          "addr:housenumber": "12", "addr:street": "MG Road", "addr:city": "Pune"}}
            ]
        }));

        assert_eq!(facilities.len(), 2);
        assert_eq!(facilities[0].kind, FacilityKind::Clinic);
        assert_eq!(facilities[0].phone.as_deref(), Some("+91 1234"));
        assert_eq!(facilities[1].coordinates, Coordinates { lat: 10.5, lon: 20.5 });
        assert_eq!(facilities[1].address.as_deref(), Some("12 MG Road, Pune"));
    }

    #[test]
    fn test_unnamed_and_unlocated_are_skipped() {
        let facilities = parse(json!({
            "elements": [
                {"type": "node", "id": 1, "lat": 1.0, "lon": 1.0, "tags": {"amenity": "hospital"}},
                {"type": "way", "id": 2, "tags": {"amenity": "hospital", "name": "No Center"}},
                {"type": "node", "id": 3, "lat": 1.0, "lon": 1.0, "tags": {"amenity": "doctors", "name": "  "}}
            ]
        }));
        assert!(facilities.is_empty());
    }

    #[test]
    fn test_healthcare_tag_used_when_amenity_missing() {
        let facilities = parse(json!({
            "elements": [
                {"type": "node", "id": 1, "lat": 1.0, "lon": 1.0,
                 "tags": {"healthcare": "doctor", "name": "Dr. Rao"}}
            ]
        }));
        assert_eq!(facilities[0].kind, FacilityKind::Doctors);
        assert_eq!(facilities[0].address, None);
    }
}
