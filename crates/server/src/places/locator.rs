//! Resolve a city and list medical facilities near it

use serde::Serialize;
use symptocare_core::facility::{dedupe_facilities, sort_facilities};
use symptocare_core::{Facility, FacilitySort, Location};

use super::{NominatimClient, OverpassClient};

/// Result of a nearby-facility search
#[derive(Debug, Clone, Serialize)]
pub struct NearbyFacilities {
    pub location: Location,
    /// True when the searched city could not be geocoded
    pub used_default: bool,
    pub facilities: Vec<Facility>,
}

/// Geocode-then-query pipeline with a fixed fallback location
#[derive(Clone)]
pub struct FacilityLocator {
    geocoder: NominatimClient,
    overpass: OverpassClient,
    radius_m: u32,
    max_facilities: usize,
    fallback: Location,
}

impl FacilityLocator {
    pub fn new(
        geocoder: NominatimClient,
        overpass: OverpassClient,
        radius_m: u32,
        max_facilities: usize,
        fallback: Location,
    ) -> Self {
        Self {
            geocoder,
            overpass,
            radius_m,
            max_facilities,
            fallback,
        }
    }

    /// Resolve `city`, falling back to the default location when it cannot be geocoded
    pub async fn resolve(&self, city: &str) -> (Location, bool) {
        let city = city.trim();
        if city.is_empty() {
            return (self.fallback.clone(), true);
        }

        match self.geocoder.geocode(city).await {
            Ok(Some(location)) => (location, false),
            Ok(None) => {
                tracing::info!(city = city, "City not found, using default location");
                (self.fallback.clone(), true)
            }
            Err(e) => {
                tracing::warn!(city = city, error = %e, "Geocoding failed, using default location");
                (self.fallback.clone(), true)
            }
        }
    }

    /// Facilities near `city`, ordered by `sort` and capped at the configured maximum.
    ///
    /// A failing facility query yields an empty list.
    pub async fn locate(&self, city: &str, sort: FacilitySort) -> NearbyFacilities {
        let (location, used_default) = self.resolve(city).await;
        let origin = location.coordinates;

        let found = match self.overpass.facilities(origin, self.radius_m).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "Facility query failed");
                Vec::new()
            }
        };

        let with_distance: Vec<Facility> = found
            .into_iter()
            .map(|f| f.with_distance_from(origin))
            .collect();

        // nearest first so truncation keeps the closest, then re-sort as requested
        let mut facilities = dedupe_facilities(with_distance);
        sort_facilities(&mut facilities, FacilitySort::Distance);
        facilities.truncate(self.max_facilities);
        if sort != FacilitySort::Distance {
            sort_facilities(&mut facilities, sort);
        }

        tracing::info!(
            location = %location.label,
            used_default = used_default,
            count = facilities.len(),
            "Nearby facilities resolved"
        );

        NearbyFacilities {
            location,
            used_default,
            facilities,
        }
    }
}
