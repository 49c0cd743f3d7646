//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::alerts::{Alert, AlertKind};
use crate::domain::{StationRecord, SupplyLevels};
use crate::focus::{FocusCoordinator, FocusState, FocusTarget};
use crate::geocode::Suggestion;
use crate::ranking::{RankedStation, Ranking};
use crate::routing::Route;

/// A latitude/longitude pair as it appears in request bodies.
///
/// Kept as raw floats; handlers validate into a `GeoPoint` so malformed
/// input maps to a 400 rather than a deserialization failure.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointParam {
    pub latitude: f64,
    pub longitude: f64,
}

/// A latitude/longitude pair in responses.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointView {
    pub latitude: f64,
    pub longitude: f64,
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub supplies: SupplyLevels,
}

impl StationResult {
    pub fn from_record(record: &StationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            display_name: record.display_name.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            supplies: record.supplies,
        }
    }
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Initial inventory; defaults to empty
    #[serde(default)]
    pub supplies: SupplyLevels,
}

/// Request to replace a station's supply levels.
#[derive(Debug, Deserialize)]
pub struct UpdateSuppliesRequest {
    pub water: u32,
    pub food: u32,
    pub medical: u32,
    pub capacity: u32,
}

impl UpdateSuppliesRequest {
    pub fn levels(&self) -> SupplyLevels {
        SupplyLevels {
            water: self.water,
            food: self.food,
            medical: self.medical,
            capacity: self.capacity,
        }
    }
}

/// Query parameters for the nearby-stations endpoint.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    /// Reference latitude (defaults to the configured reference point)
    pub lat: Option<f64>,

    /// Reference longitude (defaults to the configured reference point)
    pub lon: Option<f64>,

    /// Maximum number of stations to return
    pub limit: Option<usize>,
}

/// A ranked station in the nearby response.
#[derive(Debug, Serialize)]
pub struct RankedStationResult {
    pub id: String,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub supplies: SupplyLevels,
    pub distance_km: f64,
}

impl RankedStationResult {
    pub fn from_ranked(ranked: &RankedStation) -> Self {
        Self {
            id: ranked.station.id.to_string(),
            display_name: ranked.station.display_name.clone(),
            latitude: ranked.station.latitude,
            longitude: ranked.station.longitude,
            supplies: ranked.station.supplies,
            distance_km: ranked.distance_km,
        }
    }
}

/// Response for the nearby-stations endpoint.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub stations: Vec<RankedStationResult>,

    /// Number of records excluded for invalid stored coordinates
    pub skipped: usize,
}

impl NearbyResponse {
    pub fn from_ranking(ranking: &Ranking) -> Self {
        Self {
            stations: ranking
                .stations
                .iter()
                .map(RankedStationResult::from_ranked)
                .collect(),
            skipped: ranking.skipped.len(),
        }
    }
}

/// Query parameters for the geocoding endpoint.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

/// An address suggestion in the geocoding response.
#[derive(Debug, Serialize)]
pub struct SuggestionResult {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl SuggestionResult {
    pub fn from_suggestion(suggestion: &Suggestion) -> Self {
        Self {
            label: suggestion.label.clone(),
            latitude: suggestion.point.latitude(),
            longitude: suggestion.point.longitude(),
        }
    }
}

/// Response for the geocoding endpoint.
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub suggestions: Vec<SuggestionResult>,
}

/// Response describing the active hazard zone.
#[derive(Debug, Serialize)]
pub struct HazardResponse {
    /// Perimeter vertices in order; the ring closes implicitly.
    pub vertices: Vec<PointView>,
}

impl HazardResponse {
    pub fn from_zone(zone: &crate::hazard::HazardZone) -> Self {
        Self {
            vertices: zone
                .vertices()
                .iter()
                .map(|p| PointView {
                    latitude: p.latitude(),
                    longitude: p.longitude(),
                })
                .collect(),
        }
    }
}

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin; defaults to the configured reference point
    pub from: Option<PointParam>,

    /// Destination
    pub to: PointParam,

    /// Route around the active hazard zone (default true)
    pub avoid_hazard: Option<bool>,
}

/// A turn-by-turn step in the route response.
#[derive(Debug, Serialize)]
pub struct StepView {
    pub text: String,
    pub interval: [usize; 2],
}

/// Response for the route endpoint.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub points: Vec<PointView>,
    pub steps: Vec<StepView>,
    pub distance_km: f64,
    pub duration_secs: i64,
}

impl RouteResult {
    pub fn from_route(route: &Route) -> Self {
        Self {
            points: route
                .points
                .iter()
                .map(|p| PointView {
                    latitude: p.latitude(),
                    longitude: p.longitude(),
                })
                .collect(),
            steps: route
                .steps
                .iter()
                .map(|step| StepView {
                    text: step.text.clone(),
                    interval: [step.interval.0, step.interval.1],
                })
                .collect(),
            distance_km: route.distance_km,
            duration_secs: route.duration_secs,
        }
    }
}

/// Request to focus an address or station.
#[derive(Debug, Deserialize)]
pub struct FocusSelectRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// Request to attach a route endpoint to the active focus target.
#[derive(Debug, Deserialize)]
pub struct FocusRouteRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// The active focus target in responses.
#[derive(Debug, Serialize)]
pub struct FocusTargetView {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub zoom_level: u8,
    pub route_endpoint: Option<PointView>,
}

impl FocusTargetView {
    pub fn from_target(target: &FocusTarget) -> Self {
        Self {
            latitude: target.point.latitude(),
            longitude: target.point.longitude(),
            label: target.label.clone(),
            zoom_level: target.zoom_level,
            route_endpoint: target.route_endpoint.map(|p| PointView {
                latitude: p.latitude(),
                longitude: p.longitude(),
            }),
        }
    }
}

/// Response describing the coordinator's state.
#[derive(Debug, Serialize)]
pub struct FocusResponse {
    pub state: FocusState,
    pub target: Option<FocusTargetView>,
}

impl FocusResponse {
    pub fn from_coordinator(focus: &FocusCoordinator) -> Self {
        Self {
            state: focus.state(),
            target: focus.current_target().map(FocusTargetView::from_target),
        }
    }
}

/// Request to post a community alert.
#[derive(Debug, Deserialize)]
pub struct PostAlertRequest {
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub reporter: Option<String>,
}

/// A community alert in responses.
#[derive(Debug, Serialize)]
pub struct AlertResult {
    pub id: u64,
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub reporter: Option<String>,
    pub posted_at: String,
}

impl AlertResult {
    pub fn from_alert(alert: &Alert) -> Self {
        Self {
            id: alert.id,
            kind: alert.kind,
            title: alert.title.clone(),
            description: alert.description.clone(),
            reporter: alert.reporter.clone(),
            posted_at: alert.posted_at.to_rfc3339(),
        }
    }
}

/// Response for the alert feed.
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<AlertResult>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;
    use crate::focus::STATION_FOCUS_ZOOM;

    #[test]
    fn route_request_parses_with_defaults() {
        let body = r#"{"to": {"latitude": 34.05, "longitude": -118.24}}"#;
        let request: RouteRequest = serde_json::from_str(body).unwrap();

        assert!(request.from.is_none());
        assert!(request.avoid_hazard.is_none());
        assert_eq!(request.to.latitude, 34.05);
    }

    #[test]
    fn create_station_request_defaults_supplies() {
        let body = r#"{"display_name": "Depot", "latitude": 1.0, "longitude": 2.0}"#;
        let request: CreateStationRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.supplies, SupplyLevels::default());
    }

    #[test]
    fn update_supplies_requires_all_four_counts() {
        let body = r#"{"water": 1, "food": 2, "medical": 3}"#;
        let result: Result<UpdateSuppliesRequest, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn focus_response_serializes_state_and_target() {
        let mut focus = FocusCoordinator::new();
        focus.select_station(GeoPoint::new(34.05, -118.24).unwrap(), "Depot");

        let response = FocusResponse::from_coordinator(&focus);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["state"], "focused");
        assert_eq!(json["target"]["label"], "Depot");
        assert_eq!(json["target"]["zoom_level"], STATION_FOCUS_ZOOM);
        assert!(json["target"]["route_endpoint"].is_null());
    }

    #[test]
    fn idle_focus_response_has_no_target() {
        let focus = FocusCoordinator::new();
        let json = serde_json::to_value(FocusResponse::from_coordinator(&focus)).unwrap();

        assert_eq!(json["state"], "idle");
        assert!(json["target"].is_null());
    }
}
