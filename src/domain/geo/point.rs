//! Canonical geographic point
//!
//! Field order is (longitude, latitude) — the GeoJSON convention. Every
//! layer that persists or queries a point uses this order; the raw
//! latitude/longitude scalars on the user record are display-only.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Mean Earth radius in kilometers, used for all spherical distance math.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated geographic point.
///
/// Constructed through [`GeoPoint::new`], which takes (latitude, longitude)
/// the way callers think about coordinates, but stores and serializes
/// longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    /// Validate and normalize a (latitude, longitude) pair.
    ///
    /// Rejects non-finite values and values outside [-90, 90] / [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(DomainError::Validation(
                "latitude and longitude must be numbers".into(),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::Validation(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::Validation(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            lon: longitude,
            lat: latitude,
        })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Canonical coordinate pair, longitude first.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Great-circle distance to `other` in kilometers (haversine,
    /// spherical Earth). Full floating-point precision; rounding for
    /// display is a presentation concern, not done here.
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_coordinates() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            assert!(GeoPoint::new(lat, lon).is_ok(), "({}, {})", lat, lon);
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        for (lat, lon) in [
            (90.01, 0.0),
            (-90.01, 0.0),
            (0.0, 180.01),
            (0.0, -180.01),
            (f64::NAN, 0.0),
            (0.0, f64::INFINITY),
        ] {
            assert!(GeoPoint::new(lat, lon).is_err(), "({}, {})", lat, lon);
        }
    }

    #[test]
    fn canonical_order_is_longitude_first() {
        let p = GeoPoint::new(52.52, 13.405).unwrap();
        assert_eq!(p.coordinates(), [13.405, 52.52]);
        assert_eq!(p.lon(), 13.405);
        assert_eq!(p.lat(), 52.52);
    }

    #[test]
    fn serialized_order_is_longitude_first() {
        let p = GeoPoint::new(52.52, 13.405).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let lon_pos = json.find("\"lon\"").unwrap();
        let lat_pos = json.find("\"lat\"").unwrap();
        assert!(lon_pos < lat_pos, "longitude must serialize first: {}", json);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(48.8566, 2.3522).unwrap();
        assert_eq!(p.haversine_km(&p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let berlin = GeoPoint::new(52.52, 13.405).unwrap();
        let paris = GeoPoint::new(48.8566, 2.3522).unwrap();
        let d1 = berlin.haversine_km(&paris);
        let d2 = paris.haversine_km(&berlin);
        assert!((d1 - d2).abs() < 1e-9);
        // Berlin-Paris is roughly 878 km
        assert!((d1 - 878.0).abs() < 10.0, "got {}", d1);
    }

    #[test]
    fn quarter_great_circle_at_equator() {
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let east = GeoPoint::new(0.0, 90.0).unwrap();
        let d = origin.haversine_km(&east);
        assert!((d - 10007.54).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn antipodal_distance_bounded_by_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(0.0, 180.0).unwrap();
        let half_circumference = EARTH_RADIUS_KM * std::f64::consts::PI;
        let d = a.haversine_km(&b);
        assert!((d - half_circumference).abs() < 0.01, "got {}", d);

        for (lat1, lon1, lat2, lon2) in [
            (52.52, 13.405, -52.52, -166.595),
            (90.0, 0.0, -90.0, 0.0),
            (12.3, 45.6, -78.9, 101.1),
        ] {
            let p1 = GeoPoint::new(lat1, lon1).unwrap();
            let p2 = GeoPoint::new(lat2, lon2).unwrap();
            assert!(p1.haversine_km(&p2) <= half_circumference + 1e-6);
        }
    }
}
