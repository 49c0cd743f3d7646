//! Domain types for the supply-station service.
//!
//! This module contains the core domain model types representing validated
//! geographic and inventory data. Types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod point;
mod station;
mod supply;

pub use point::{EARTH_RADIUS_KM, GeoPoint, InvalidCoordinate, distance_km};
pub use station::{InvalidStationId, StationId, StationRecord};
pub use supply::{SupplyKind, SupplyLevels};
