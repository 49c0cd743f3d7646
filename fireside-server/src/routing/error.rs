//! Routing error types.

use crate::domain::InvalidCoordinate;

/// Errors that can occur when fetching a route.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check GRAPHHOPPER_API_KEY")]
    Unauthorized,

    /// Provider returned an error status
    #[error("routing error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider returned no route between the points
    #[error("no route found")]
    NoRoute,

    /// Provider returned geometry with an invalid coordinate
    #[error("route geometry contains an invalid coordinate: {0}")]
    Geometry(InvalidCoordinate),
}
