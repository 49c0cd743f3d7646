use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use fireside_server::alerts::CommunityAlerts;
use fireside_server::cache::{CachedGeocodeClient, GeocodeCacheConfig};
use fireside_server::domain::GeoPoint;
use fireside_server::geocode::{GeocodeClient, GeocodeConfig};
use fireside_server::hazard::los_angeles_perimeter;
use fireside_server::registry::{SnapshotConfig, SnapshotStore, StationRegistry};
use fireside_server::routing::{RoutingClient, RoutingConfig};
use fireside_server::web::{AppState, create_router};

/// How often to write the station snapshot to disk (5 minutes).
const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Reference point distances are measured from when a request does not
/// supply one (downtown Los Angeles, west of the default hazard zone).
const DEFAULT_REFERENCE: (f64, f64) = (34.0522, -118.2637);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Get credentials from environment
    let graphhopper_key = std::env::var("GRAPHHOPPER_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: GRAPHHOPPER_API_KEY not set. Route requests will fail.");
        String::new()
    });
    let admin_key = std::env::var("FIRESIDE_ADMIN_KEY")
        .ok()
        .filter(|key| !key.is_empty());
    if admin_key.is_none() {
        eprintln!("Warning: FIRESIDE_ADMIN_KEY not set. Station writes are disabled.");
    }
    let snapshot_path =
        std::env::var("FIRESIDE_SNAPSHOT").unwrap_or_else(|_| "data/stations.json".to_string());

    // Load the station registry from the last snapshot, if any
    let snapshot = SnapshotStore::new(SnapshotConfig::new(&snapshot_path));
    let registry = match snapshot.load() {
        Some(records) => {
            println!("Loaded {} stations from {}", records.len(), snapshot_path);
            StationRegistry::from_records(records)
        }
        None => {
            println!("No station snapshot at {snapshot_path}; starting empty");
            StationRegistry::new()
        }
    };

    // Geocoding client with response cache
    let geocode_client =
        GeocodeClient::new(GeocodeConfig::default()).expect("Failed to create geocoding client");
    let geocoder = CachedGeocodeClient::new(geocode_client, &GeocodeCacheConfig::default());

    // Routing client
    let routing = RoutingClient::new(RoutingConfig::new(&graphhopper_key))
        .expect("Failed to create routing client");

    let reference = GeoPoint::new(DEFAULT_REFERENCE.0, DEFAULT_REFERENCE.1)
        .expect("default reference point is valid");

    // Spawn background task to snapshot the registry periodically
    let registry_snapshot = registry.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SNAPSHOT_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            let records = registry_snapshot.list().await;
            match snapshot.save(&records) {
                Ok(()) => tracing::debug!(count = records.len(), "saved station snapshot"),
                Err(e) => eprintln!("Failed to save station snapshot: {}", e),
            }
        }
    });

    // Build app state
    let state = AppState::new(
        registry,
        geocoder,
        routing,
        los_angeles_perimeter(),
        CommunityAlerts::new(),
        reference,
        admin_key,
    );

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Fireside listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health               - Health check");
    println!("  GET  /api/stations         - List stations");
    println!("  GET  /api/stations/nearby  - Nearest stations to a point");
    println!("  GET  /api/geocode          - Address search");
    println!("  POST /api/route            - Route avoiding the hazard zone");
    println!("  GET  /api/focus            - Current map focus");
    println!("  GET  /api/alerts           - Community alerts");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
