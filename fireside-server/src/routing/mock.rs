//! Mock routing client for testing without API access.

use crate::domain::{GeoPoint, distance_km};
use crate::hazard::HazardZone;

use super::error::RoutingError;
use super::types::{Route, RouteStep};

/// Nominal driving speed used for the mock's travel-time estimate (km/h).
const MOCK_SPEED_KMH: f64 = 40.0;

/// Mock routing client that returns a straight-line path.
///
/// Mimics the real `RoutingClient::route` interface; the avoid polygon is
/// accepted but ignored since there is no road network to plot around.
#[derive(Debug, Clone, Default)]
pub struct MockRoutingClient;

impl MockRoutingClient {
    /// Create a new mock client.
    pub fn new() -> Self {
        Self
    }

    /// Produce a two-point route straight from `from` to `to`.
    pub async fn route(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        _avoid: Option<&HazardZone>,
    ) -> Result<Route, RoutingError> {
        let distance = distance_km(from, to);

        Ok(Route {
            points: vec![*from, *to],
            steps: vec![RouteStep {
                text: "Head to destination".to_string(),
                interval: (0, 1),
            }],
            distance_km: distance,
            duration_secs: (distance / MOCK_SPEED_KMH * 3600.0) as i64,
        })
    }
}
