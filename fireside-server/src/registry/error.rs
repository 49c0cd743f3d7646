//! Registry error types.

use crate::domain::StationId;

/// Errors that can occur when mutating or persisting the station registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No station with this id
    #[error("unknown station: {0}")]
    UnknownStation(StationId),

    /// Snapshot persistence failed
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}
