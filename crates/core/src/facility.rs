//! Nearby medical facilities: kinds, ordering and de-duplication

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::geo::{Coordinates, haversine_km};

/// Kind of medical facility, mapped from OSM `amenity`/`healthcare` values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    Hospital,
    Clinic,
    Doctors,
    Pharmacy,
    Other,
}

impl FacilityKind {
    /// Map an OSM tag value to a kind
    pub fn from_osm(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hospital" => FacilityKind::Hospital,
            "clinic" => FacilityKind::Clinic,
            "doctors" | "doctor" => FacilityKind::Doctors,
            "pharmacy" => FacilityKind::Pharmacy,
            _ => FacilityKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityKind::Hospital => "hospital",
            FacilityKind::Clinic => "clinic",
            FacilityKind::Doctors => "doctors",
            FacilityKind::Pharmacy => "pharmacy",
            FacilityKind::Other => "other",
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A medical point of interest near the searched location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facility {
    pub name: String,
    pub kind: FacilityKind,
    pub coordinates: Coordinates,
    /// Distance from the searched location, filled by [`Facility::with_distance_from`]
    pub distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}

impl Facility {
    pub fn new(name: impl Into<String>, kind: FacilityKind, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            kind,
            coordinates,
            distance_km: 0.0,
            address: None,
            phone: None,
            website: None,
            opening_hours: None,
        }
    }

    /// Set `distance_km` relative to `origin`
    pub fn with_distance_from(mut self, origin: Coordinates) -> Self {
        self.distance_km = haversine_km(origin, self.coordinates);
        self
    }
}

/// Ordering of the facility list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FacilitySort {
    #[default]
    Distance,
    #[serde(alias = "type")]
    Kind,
}

impl FromStr for FacilitySort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "distance" => Ok(FacilitySort::Distance),
            "kind" | "type" => Ok(FacilitySort::Kind),
            other => Err(CoreError::InvalidInput(format!(
                "unknown sort order '{other}'"
            ))),
        }
    }
}

/// Sort facilities in place: nearest first, or grouped by kind label then nearest
pub fn sort_facilities(facilities: &mut [Facility], order: FacilitySort) {
    match order {
        FacilitySort::Distance => facilities.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.name.cmp(&b.name))
        }),
        FacilitySort::Kind => facilities.sort_by(|a, b| {
            a.kind
                .as_str()
                .cmp(b.kind.as_str())
                .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        }),
    }
}

/// Drop entries sharing a case-insensitive name and kind, keeping the nearest.
///
/// OSM often maps one hospital as both a node and a building outline.
/// Output order follows first appearance.
pub fn dedupe_facilities(facilities: Vec<Facility>) -> Vec<Facility> {
    let mut index: HashMap<(String, FacilityKind), usize> = HashMap::new();
    let mut kept: Vec<Facility> = Vec::with_capacity(facilities.len());

    for facility in facilities {
        let key = (facility.name.trim().to_lowercase(), facility.kind);
        match index.get(&key) {
            Some(&i) => {
                if facility.distance_km < kept[i].distance_km {
                    kept[i] = facility;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(facility);
            }
        }
    }

    kept
}

/// Round a distance to one decimal place for display
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(name: &str, kind: FacilityKind, distance_km: f64) -> Facility {
        let mut f = Facility::new(name, kind, Coordinates { lat: 0.0, lon: 0.0 });
        f.distance_km = distance_km;
        f
    }

    fn names(list: &[Facility]) -> Vec<&str> {
        list.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_kind_from_osm() {
        assert_eq!(FacilityKind::from_osm("Hospital"), FacilityKind::Hospital);
        assert_eq!(FacilityKind::from_osm("doctors"), FacilityKind::Doctors);
        assert_eq!(FacilityKind::from_osm("dentist"), FacilityKind::Other);
    }

    #[test]
    fn test_sort_by_distance() {
        let mut list = vec![
            facility("C", FacilityKind::Clinic, 3.2),
            facility("A", FacilityKind::Hospital, 0.4),
            facility("B", FacilityKind::Doctors, 1.9),
        ];
        sort_facilities(&mut list, FacilitySort::Distance);
        assert_eq!(names(&list), ["A", "B", "C"]);
    }

    #[test]
    fn test_sort_by_distance_ties_by_name() {
        let mut list = vec![
            facility("Zeta", FacilityKind::Clinic, 1.0),
            facility("Alpha", FacilityKind::Clinic, 1.0),
        ];
        sort_facilities(&mut list, FacilitySort::Distance);
        assert_eq!(names(&list), ["Alpha", "Zeta"]);
    }

    #[test]
    fn test_sort_by_kind_then_distance() {
        let mut list = vec![
            facility("H2", FacilityKind::Hospital, 2.0),
            facility("C1", FacilityKind::Clinic, 5.0),
            facility("H1", FacilityKind::Hospital, 1.0),
            facility("D1", FacilityKind::Doctors, 0.1),
        ];
        sort_facilities(&mut list, FacilitySort::Kind);
        assert_eq!(names(&list), ["C1", "D1", "H1", "H2"]);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("type".parse::<FacilitySort>().unwrap(), FacilitySort::Kind);
        assert_eq!("".parse::<FacilitySort>().unwrap(), FacilitySort::Distance);
        assert!("rating".parse::<FacilitySort>().is_err());
    }

    #[test]
    fn test_sort_deserialize_accepts_type_alias() {
        let sort: FacilitySort = serde_json::from_str("\"type\"").unwrap();
        assert_eq!(sort, FacilitySort::Kind);
    }

    #[test]
    fn test_dedupe_keeps_nearest() {
        let list = vec![
            facility("City Hospital", FacilityKind::Hospital, 2.5),
            facility("Care Clinic", FacilityKind::Clinic, 1.0),
            facility("city hospital ", FacilityKind::Hospital, 2.1),
            facility("City Hospital", FacilityKind::Pharmacy, 2.0),
        ];
        let deduped = dedupe_facilities(list);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].distance_km, 2.1);
        assert_eq!(deduped[1].name, "Care Clinic");
    }

    #[test]
    fn test_distance_from_origin() {
        let f = Facility::new(
            "X",
            FacilityKind::Clinic,
            Coordinates { lat: 0.0, lon: 1.0 },
        )
        .with_distance_from(Coordinates { lat: 0.0, lon: 0.0 });
        assert_eq!(round_km(f.distance_km), 111.2);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(1.26), 1.3);
        assert_eq!(round_km(0.04), 0.0);
    }
}
