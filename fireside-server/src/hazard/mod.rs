//! Wildfire hazard zone.
//!
//! The active fire perimeter, displayed by the map collaborator and passed
//! to the routing provider as an exclusion polygon so evacuation routes are
//! plotted around the fire rather than through it.

use crate::domain::GeoPoint;

/// Error returned when constructing a degenerate hazard polygon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hazard zone: {reason}")]
pub struct InvalidHazardZone {
    reason: &'static str,
}

/// A polygonal exclusion zone around an active fire.
///
/// Vertices describe the perimeter in order; the ring closes back to the
/// first vertex implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardZone {
    vertices: Vec<GeoPoint>,
}

impl HazardZone {
    /// Create a zone from its perimeter vertices.
    ///
    /// Requires at least three distinct vertices. A trailing vertex equal
    /// to the first (an explicitly closed ring) is dropped.
    pub fn new(mut vertices: Vec<GeoPoint>) -> Result<Self, InvalidHazardZone> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(InvalidHazardZone {
                reason: "a polygon needs at least three vertices",
            });
        }
        Ok(Self { vertices })
    }

    /// The perimeter vertices, without the closing repeat.
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Format the zone as a routing-provider avoid parameter.
    ///
    /// Produces `polygon:lat,lon:lat,lon:…` with the first vertex repeated
    /// at the end to close the ring, the form GraphHopper's `avoid`
    /// parameter takes.
    pub fn avoid_parameter(&self) -> String {
        let mut out = String::from("polygon");
        for vertex in self.vertices.iter().chain(self.vertices.first()) {
            out.push(':');
            out.push_str(&vertex.to_string());
        }
        out
    }
}

/// The Los Angeles fire perimeter used as the default active zone.
pub fn los_angeles_perimeter() -> HazardZone {
    const PERIMETER: [(f64, f64); 18] = [
        (34.0522, -118.2437),
        (34.0535, -118.246),
        (34.0548, -118.2455),
        (34.0555, -118.247),
        (34.056, -118.2485),
        (34.0552, -118.25),
        (34.0558, -118.2515),
        (34.0545, -118.2525),
        (34.0535, -118.2515),
        (34.0525, -118.253),
        (34.0515, -118.252),
        (34.0505, -118.2525),
        (34.05, -118.251),
        (34.049, -118.25),
        (34.0495, -118.2485),
        (34.0485, -118.247),
        (34.0495, -118.2455),
        (34.051, -118.2445),
    ];

    // All constants above are in range; the filter keeps construction total
    // without an unwrap.
    let vertices = PERIMETER
        .iter()
        .filter_map(|&(lat, lon)| GeoPoint::new(lat, lon).ok())
        .collect();

    HazardZone { vertices }
}
