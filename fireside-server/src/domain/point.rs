//! Geographic coordinate type and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres, used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing a coordinate outside the valid ranges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated geographic coordinate.
///
/// Latitude is degrees in [-90, 90], longitude degrees in [-180, 180], both
/// finite. This type guarantees that any `GeoPoint` value is valid by
/// construction; out-of-range input is rejected, never clamped.
///
/// # Examples
///
/// ```
/// use fireside_server::domain::GeoPoint;
///
/// let la = GeoPoint::new(34.0522, -118.2437).unwrap();
/// assert_eq!(la.latitude(), 34.0522);
///
/// // Out-of-range latitude is rejected
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form of a coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a coordinate, validating the latitude/longitude ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude must be finite",
            });
        }
        if !longitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_km(self, other)
    }
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl From<GeoPoint> for RawPoint {
    fn from(point: GeoPoint) -> Self {
        RawPoint {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    /// Formats as `lat,lon`, the form upstream routing and geocoding
    /// providers take in query parameters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two points in kilometres.
///
/// Haversine formula over a spherical Earth of radius [`EARTH_RADIUS_KM`].
/// Symmetric, zero for identical points, and monotone in angular
/// separation. Pure and deterministic.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
