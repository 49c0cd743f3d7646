//! GraphHopper wire types and their domain counterparts.

use serde::Deserialize;

use crate::domain::GeoPoint;

use super::error::RoutingError;

/// Top-level routing response.
#[derive(Debug, Deserialize)]
pub struct RouteResponseDto {
    #[serde(default)]
    pub paths: Vec<PathDto>,
}

/// A single computed path.
#[derive(Debug, Deserialize)]
pub struct PathDto {
    pub points: PointsDto,

    #[serde(default)]
    pub instructions: Vec<InstructionDto>,

    /// Path length in metres.
    #[serde(default)]
    pub distance: f64,

    /// Travel time in milliseconds.
    #[serde(default)]
    pub time: i64,
}

/// Path geometry. Coordinates arrive as `[lon, lat]` pairs.
#[derive(Debug, Deserialize)]
pub struct PointsDto {
    pub coordinates: Vec<[f64; 2]>,
}

/// A turn-by-turn instruction. `interval` indexes into the geometry.
#[derive(Debug, Deserialize)]
pub struct InstructionDto {
    pub text: String,
    pub interval: [usize; 2],
}

/// A turn-by-turn step of a computed route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub text: String,
    /// Start and end index into the route's point list.
    pub interval: (usize, usize),
}

/// A computed route in domain terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Path geometry as validated coordinates, in travel order.
    pub points: Vec<GeoPoint>,
    /// Turn-by-turn steps.
    pub steps: Vec<RouteStep>,
    /// Path length in kilometres.
    pub distance_km: f64,
    /// Estimated travel time in seconds.
    pub duration_secs: i64,
}

/// Convert the first path of a provider response into a [`Route`].
///
/// The provider's `[lon, lat]` coordinate order is swapped here; a response
/// with no paths is [`RoutingError::NoRoute`].
pub(super) fn convert_response(response: RouteResponseDto) -> Result<Route, RoutingError> {
    let Some(path) = response.paths.into_iter().next() else {
        return Err(RoutingError::NoRoute);
    };

    let mut points = Vec::with_capacity(path.points.coordinates.len());
    for [lon, lat] in path.points.coordinates {
        let point = GeoPoint::new(lat, lon).map_err(RoutingError::Geometry)?;
        points.push(point);
    }

    let steps = path
        .instructions
        .into_iter()
        .map(|instruction| RouteStep {
            text: instruction.text,
            interval: (instruction.interval[0], instruction.interval[1]),
        })
        .collect();

    Ok(Route {
        points,
        steps,
        distance_km: path.distance / 1000.0,
        duration_secs: path.time / 1000,
    })
}
