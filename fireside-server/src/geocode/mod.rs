//! Address geocoding.
//!
//! Turns free-text address queries into `(coordinate, label)` suggestions
//! via the Nominatim search API. The cached wrapper in [`crate::cache`]
//! sits in front of the client in production.

mod client;
mod error;
mod mock;

pub use client::{GeocodeClient, GeocodeConfig, MIN_QUERY_LEN};
pub use error::GeocodeError;
pub use mock::MockGeocodeClient;

use serde::Serialize;

use crate::domain::GeoPoint;

/// A geocoded address suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub point: GeoPoint,
    pub label: String,
}

/// Upstream geocoding interface, implemented by the HTTP client and by the
/// in-memory mock.
pub trait Geocoder {
    /// Search for address suggestions matching a free-text query.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Suggestion>, GeocodeError>> + Send;
}
