//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::domain::{GeoPoint, StationId};
use crate::geocode::GeocodeError;
use crate::ranking::{DEFAULT_LIMIT, rank};
use crate::registry::{NewStation, RegistryError, WriteAccess};
use crate::routing::RoutingError;

use super::dto::*;
use super::state::AppState;

/// Largest limit the nearby endpoint will honor.
const MAX_NEARBY_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // The React client is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations).post(create_station))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/stations/:id/supplies", put(update_supplies))
        .route("/api/geocode", get(geocode))
        .route("/api/hazard", get(hazard_zone))
        .route("/api/route", post(plan_route))
        .route("/api/focus", get(current_focus).delete(reset_focus))
        .route("/api/focus/address", post(focus_address))
        .route("/api/focus/station", post(focus_station))
        .route("/api/focus/route", post(focus_route).delete(clear_focus_route))
        .route("/api/alerts", get(list_alerts).post(post_alert))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse raw request coordinates into a validated point.
fn parse_point(latitude: f64, longitude: f64) -> Result<GeoPoint, AppError> {
    GeoPoint::new(latitude, longitude).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Verify the admin API key and mint a write capability.
fn require_write_access(state: &AppState, headers: &HeaderMap) -> Result<WriteAccess, AppError> {
    let Some(expected) = state.admin_key.as_deref() else {
        return Err(AppError::Unauthorized);
    };

    let provided = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == expected => Ok(WriteAccess::granted()),
        _ => Err(AppError::Unauthorized),
    }
}

/// List all registered stations.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .registry
        .list()
        .await
        .iter()
        .map(StationResult::from_record)
        .collect();

    Json(StationsResponse { stations })
}

/// Register a new station.
async fn create_station(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateStationRequest>,
) -> Result<(StatusCode, Json<StationResult>), AppError> {
    let access = require_write_access(&state, &headers)?;
    let location = parse_point(req.latitude, req.longitude)?;

    if req.display_name.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "display_name must not be empty".to_string(),
        });
    }

    let record = state
        .registry
        .create(
            access,
            NewStation {
                display_name: req.display_name,
                location,
                supplies: req.supplies,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(StationResult::from_record(&record))))
}

/// Replace a station's supply levels.
async fn update_supplies(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateSuppliesRequest>,
) -> Result<Json<StationResult>, AppError> {
    let access = require_write_access(&state, &headers)?;

    let id = StationId::new(id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let record = state
        .registry
        .update_supplies(access, &id, req.levels())
        .await?;

    Ok(Json(StationResult::from_record(&record)))
}

/// The nearest stations to a reference point.
async fn nearby_stations(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>, AppError> {
    let reference = match (query.lat, query.lon) {
        (None, None) => state.reference,
        (Some(lat), Some(lon)) => parse_point(lat, lon)?,
        _ => {
            return Err(AppError::BadRequest {
                message: "lat and lon must be provided together".to_string(),
            });
        }
    };

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_NEARBY_LIMIT);
    let stations = state.registry.list().await;
    let ranking = rank(&reference, &stations, limit);

    Ok(Json(NearbyResponse::from_ranking(&ranking)))
}

/// Address suggestions for a free-text query.
async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let suggestions = state.geocoder.search(&query.q).await?;

    Ok(Json(GeocodeResponse {
        suggestions: suggestions
            .iter()
            .map(SuggestionResult::from_suggestion)
            .collect(),
    }))
}

/// The active hazard zone, for display as a map overlay.
async fn hazard_zone(State(state): State<AppState>) -> Json<HazardResponse> {
    Json(HazardResponse::from_zone(&state.hazard))
}

/// Plan a route to a destination, avoiding the hazard zone.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResult>, AppError> {
    let from = match req.from {
        Some(p) => parse_point(p.latitude, p.longitude)?,
        None => state.reference,
    };
    let to = parse_point(req.to.latitude, req.to.longitude)?;

    let avoid = req
        .avoid_hazard
        .unwrap_or(true)
        .then(|| state.hazard.as_ref());

    let route = state.routing.route(&from, &to, avoid).await?;

    Ok(Json(RouteResult::from_route(&route)))
}

/// The current focus state.
async fn current_focus(State(state): State<AppState>) -> Json<FocusResponse> {
    let focus = state.focus.lock().await;
    Json(FocusResponse::from_coordinator(&focus))
}

/// Focus an address search hit.
async fn focus_address(
    State(state): State<AppState>,
    Json(req): Json<FocusSelectRequest>,
) -> Result<Json<FocusResponse>, AppError> {
    let point = parse_point(req.latitude, req.longitude)?;

    let mut focus = state.focus.lock().await;
    focus.select_address(point, req.label);

    Ok(Json(FocusResponse::from_coordinator(&focus)))
}

/// Focus a clicked station.
async fn focus_station(
    State(state): State<AppState>,
    Json(req): Json<FocusSelectRequest>,
) -> Result<Json<FocusResponse>, AppError> {
    let point = parse_point(req.latitude, req.longitude)?;

    let mut focus = state.focus.lock().await;
    focus.select_station(point, req.label);

    Ok(Json(FocusResponse::from_coordinator(&focus)))
}

/// Attach a route endpoint to the active focus target.
///
/// A no-op while idle, reported through the returned state rather than as
/// an error.
async fn focus_route(
    State(state): State<AppState>,
    Json(req): Json<FocusRouteRequest>,
) -> Result<Json<FocusResponse>, AppError> {
    let endpoint = parse_point(req.latitude, req.longitude)?;

    let mut focus = state.focus.lock().await;
    focus.request_route(endpoint);

    Ok(Json(FocusResponse::from_coordinator(&focus)))
}

/// Drop the route endpoint, keeping the focus target.
async fn clear_focus_route(State(state): State<AppState>) -> Json<FocusResponse> {
    let mut focus = state.focus.lock().await;
    focus.clear_route();

    Json(FocusResponse::from_coordinator(&focus))
}

/// Clear all focus state.
async fn reset_focus(State(state): State<AppState>) -> Json<FocusResponse> {
    let mut focus = state.focus.lock().await;
    focus.reset();

    Json(FocusResponse::from_coordinator(&focus))
}

/// The community alert feed, newest first.
async fn list_alerts(State(state): State<AppState>) -> Json<AlertsResponse> {
    let alerts = state
        .alerts
        .list()
        .await
        .iter()
        .map(AlertResult::from_alert)
        .collect();

    Json(AlertsResponse { alerts })
}

/// Post a community alert.
async fn post_alert(
    State(state): State<AppState>,
    Json(req): Json<PostAlertRequest>,
) -> Result<(StatusCode, Json<AlertResult>), AppError> {
    let alert = state
        .alerts
        .post(req.kind, req.title, req.description, req.reporter)
        .await
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    Ok((StatusCode::CREATED, Json(AlertResult::from_alert(&alert))))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized,
    NotFound { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownStation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            RegistryError::Snapshot { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<RoutingError> for AppError {
    fn from(e: RoutingError) -> Self {
        match e {
            RoutingError::NoRoute => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "missing or invalid API key".to_string(),
            ),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
