//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::alerts::CommunityAlerts;
use crate::cache::CachedGeocodeClient;
use crate::domain::GeoPoint;
use crate::focus::FocusCoordinator;
use crate::geocode::GeocodeClient;
use crate::hazard::HazardZone;
use crate::registry::StationRegistry;
use crate::routing::RoutingClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station registry
    pub registry: StationRegistry,

    /// Cached geocoding client
    pub geocoder: Arc<CachedGeocodeClient<GeocodeClient>>,

    /// Routing provider client
    pub routing: Arc<RoutingClient>,

    /// Active hazard zone, excluded from routes
    pub hazard: Arc<HazardZone>,

    /// Community alert feed
    pub alerts: CommunityAlerts,

    /// The session's focus coordinator. One writer at a time; transitions
    /// are serialized by this mutex.
    pub focus: Arc<Mutex<FocusCoordinator>>,

    /// Reference point used when a request doesn't supply one
    pub reference: GeoPoint,

    /// Admin API key gating station writes. `None` disables writes.
    pub admin_key: Option<Arc<str>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        registry: StationRegistry,
        geocoder: CachedGeocodeClient<GeocodeClient>,
        routing: RoutingClient,
        hazard: HazardZone,
        alerts: CommunityAlerts,
        reference: GeoPoint,
        admin_key: Option<String>,
    ) -> Self {
        Self {
            registry,
            geocoder: Arc::new(geocoder),
            routing: Arc::new(routing),
            hazard: Arc::new(hazard),
            alerts,
            focus: Arc::new(Mutex::new(FocusCoordinator::new())),
            reference,
            admin_key: admin_key.map(Arc::from),
        }
    }
}
