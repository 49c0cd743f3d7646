//! Web layer for the supply-station service.
//!
//! Provides the JSON API the map frontend consumes: stations and their
//! inventories, proximity ranking, geocoding, routing, focus coordination,
//! and the community alert feed.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
