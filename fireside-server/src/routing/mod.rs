//! Evacuation routing.
//!
//! Fetches road routes between two points from the GraphHopper API,
//! excluding the active hazard zone so the suggested path goes around the
//! fire. The service only needs geometry and turn-by-turn text; live
//! traffic and re-routing belong to the provider.

mod client;
mod error;
mod mock;
mod types;

pub use client::{RoutingClient, RoutingConfig};
pub use error::RoutingError;
pub use mock::MockRoutingClient;
pub use types::{InstructionDto, PathDto, PointsDto, Route, RouteResponseDto, RouteStep};
