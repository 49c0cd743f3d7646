//! Station registry.
//!
//! Holds the station records the ranking and map layers read. Backed by an
//! in-memory map with a JSON snapshot on disk standing in for the external
//! persistence collaborator. Writes require a [`WriteAccess`] capability
//! token minted by the caller's authorization layer.

mod error;
mod snapshot;
mod store;

pub use error::RegistryError;
pub use snapshot::{SnapshotConfig, SnapshotStore};
pub use store::{NewStation, StationRegistry, WriteAccess};
