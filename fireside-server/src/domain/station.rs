//! Station identity and record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::{GeoPoint, InvalidCoordinate};
use super::supply::SupplyLevels;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// An opaque station identifier.
///
/// Identifiers are assigned by the persistence collaborator; the service
/// only requires them to be non-empty and uses their lexicographic order as
/// the deterministic tie-break when ranking stations at equal distance.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Create a station id from a non-empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidStationId> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }
        Ok(StationId(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        StationId::new(id)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A supply station as stored by the persistence collaborator.
///
/// Coordinates are kept as the raw floats that were stored; they are
/// validated into a [`GeoPoint`] at the point of use so that one bad record
/// degrades to a skip instead of poisoning every consumer of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: StationId,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub supplies: SupplyLevels,
}

impl StationRecord {
    /// Validate the stored coordinates into a [`GeoPoint`].
    pub fn location(&self) -> Result<GeoPoint, InvalidCoordinate> {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StationId::new("station-0001").is_ok());
        assert!(StationId::new("cku8z3").is_ok());
    }

    #[test]
    fn reject_empty_ids() {
        assert!(StationId::new("").is_err());
        assert!(StationId::new("   ").is_err());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = StationId::new("station-0001").unwrap();
        let b = StationId::new("station-0002").unwrap();
        assert!(a < b);
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::new("station-0042").unwrap();
        assert_eq!(format!("{}", id), "station-0042");
        assert_eq!(format!("{:?}", id), "StationId(station-0042)");
    }

    #[test]
    fn serde_rejects_empty_id() {
        let result: Result<StationId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    fn record(lat: f64, lon: f64) -> StationRecord {
        StationRecord {
            id: StationId::new("station-0001").unwrap(),
            display_name: "Echo Park Depot".to_string(),
            latitude: lat,
            longitude: lon,
            supplies: SupplyLevels::default(),
        }
    }

    #[test]
    fn location_validates_stored_coordinates() {
        assert!(record(34.0522, -118.2437).location().is_ok());
        assert!(record(134.0, -118.2437).location().is_err());
        assert!(record(34.0522, f64::NAN).location().is_err());
    }

    #[test]
    fn record_serde_roundtrip() {
        let original = record(34.0522, -118.2437);
        let json = serde_json::to_string(&original).unwrap();
        let back: StationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
