//! Geographic coordinates and the local map projection.
//!
//! World space is a flat plane measured in meters, produced by an
//! equirectangular projection around a fixed per-session origin. Within a
//! city-sized window the distortion is negligible, and a flat plane keeps
//! every editor interaction in plain 2D math.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG};

/// Meters per degree of latitude (web-map convention)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// A latitude/longitude pair in floating-point degrees.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// False for NaN or infinite coordinates from malformed input.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Projection origin for the current session.
///
/// Chosen once when a session starts (the initial map center) and left alone
/// afterwards so world coordinates stay stable while the user pans around.
#[derive(Resource, Clone, Copy, Debug)]
pub struct MapOrigin(pub GeoPoint);

impl Default for MapOrigin {
    fn default() -> Self {
        Self(GeoPoint::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG))
    }
}

impl MapOrigin {
    /// World position (meters east/north of the origin) of a geographic point.
    pub fn project(&self, point: GeoPoint) -> Vec2 {
        let east = (point.lng - self.0.lng) * METERS_PER_DEGREE * lat_cos(self.0.lat);
        let north = (point.lat - self.0.lat) * METERS_PER_DEGREE;
        Vec2::new(east as f32, north as f32)
    }

    /// Geographic point of a world position.
    pub fn unproject(&self, world: Vec2) -> GeoPoint {
        let lng = self.0.lng + world.x as f64 / (METERS_PER_DEGREE * lat_cos(self.0.lat));
        let lat = self.0.lat + world.y as f64 / METERS_PER_DEGREE;
        GeoPoint::new(lat, lng)
    }
}

/// Offset a geographic point by meters east and north.
///
/// East-west degree distance shrinks by cos(latitude), so the longitude
/// delta is corrected at the point's own latitude.
pub fn offset_by_meters(point: GeoPoint, east: f64, north: f64) -> GeoPoint {
    GeoPoint::new(
        point.lat + north / METERS_PER_DEGREE,
        point.lng + east / (METERS_PER_DEGREE * lat_cos(point.lat)),
    )
}

/// Cosine of a latitude in degrees, clamped away from zero.
///
/// The projection degenerates at the poles; the clamp keeps unproject and
/// offsets finite for pathological input.
fn lat_cos(lat_deg: f64) -> f64 {
    lat_deg.to_radians().cos().max(1e-6)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_default_origin_is_paris() {
        let origin = MapOrigin::default();
        assert_eq!(origin.0.lat, DEFAULT_CENTER_LAT);
        assert_eq!(origin.0.lng, DEFAULT_CENTER_LNG);
    }

    #[test]
    fn test_project_origin_is_world_zero() {
        let origin = MapOrigin::default();
        assert_eq!(origin.project(origin.0), Vec2::ZERO);
    }

    #[test]
    fn test_north_is_positive_y() {
        let origin = MapOrigin(GeoPoint::new(48.0, 2.0));
        let world = origin.project(GeoPoint::new(48.01, 2.0));
        assert!(world.y > 0.0);
        assert!(world.x.abs() < 1e-3);
    }

    #[test]
    fn test_east_is_positive_x() {
        let origin = MapOrigin(GeoPoint::new(48.0, 2.0));
        let world = origin.project(GeoPoint::new(48.0, 2.01));
        assert!(world.x > 0.0);
        assert!(world.y.abs() < 1e-3);
    }

    #[test]
    fn test_one_degree_of_latitude_in_meters() {
        let origin = MapOrigin(GeoPoint::new(0.0, 0.0));
        let world = origin.project(GeoPoint::new(1.0, 0.0));
        assert!((world.y as f64 - METERS_PER_DEGREE).abs() < 1.0);
    }

    #[test]
    fn test_longitude_compressed_at_high_latitude() {
        let equator = MapOrigin(GeoPoint::new(0.0, 0.0));
        let sixty = MapOrigin(GeoPoint::new(60.0, 0.0));

        let at_equator = equator.project(GeoPoint::new(0.0, 1.0)).x as f64;
        let at_sixty = sixty.project(GeoPoint::new(60.0, 1.0)).x as f64;

        // cos(60 deg) = 0.5
        assert!((at_sixty / at_equator - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_project_unproject_round_trip() {
        let origin = MapOrigin::default();
        let point = GeoPoint::new(48.86, 2.34);
        let back = origin.unproject(origin.project(point));
        assert!((back.lat - point.lat).abs() < 1e-5);
        assert!((back.lng - point.lng).abs() < 1e-5);
    }

    #[test]
    fn test_offset_north_increases_latitude() {
        let point = GeoPoint::new(48.8566, 2.3522);
        let moved = offset_by_meters(point, 0.0, METERS_PER_DEGREE);
        assert!((moved.lat - (point.lat + 1.0)).abs() < EPS);
        assert!((moved.lng - point.lng).abs() < EPS);
    }

    #[test]
    fn test_offset_east_corrected_by_latitude() {
        let at_equator = offset_by_meters(GeoPoint::new(0.0, 0.0), 1000.0, 0.0);
        let at_sixty = offset_by_meters(GeoPoint::new(60.0, 0.0), 1000.0, 0.0);

        // The same eastward distance spans twice the longitude at 60 degrees.
        assert!((at_sixty.lng / at_equator.lng - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_is_finite_rejects_nan() {
        assert!(GeoPoint::new(48.0, 2.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 2.0).is_finite());
        assert!(!GeoPoint::new(48.0, f64::INFINITY).is_finite());
    }
}
