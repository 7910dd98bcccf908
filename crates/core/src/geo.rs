//! Coordinates and great-circle distance

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(CoreError::InvalidCoordinates { lat, lon })
        }
    }
}

/// A resolved place: where facilities are searched, and the label shown to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub coordinates: Coordinates,
    pub label: String,
}

/// Haversine distance between two points in kilometres
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn test_zero_distance() {
        let p = point(12.9716, 77.5946);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_known_distance_delhi_mumbai() {
        // about 1150 km as the crow flies
        let delhi = point(28.6139, 77.2090);
        let mumbai = point(19.0760, 72.8777);
        let d = haversine_km(delhi, mumbai);
        assert!((1140.0..1160.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_symmetric() {
        let a = point(51.5074, -0.1278);
        let b = point(48.8566, 2.3522);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_antipodes_do_not_nan() {
        let d = haversine_km(point(0.0, 0.0), point(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }
}
