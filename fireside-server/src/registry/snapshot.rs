//! Disk snapshot of the station registry.
//!
//! A JSON file stands in for the external persistence collaborator: loaded
//! at startup, written periodically by a background task so registered
//! stations survive restarts.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::domain::StationRecord;

use super::error::RegistryError;

/// Snapshot file contents with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    /// Unix timestamp when the snapshot was written.
    saved_at_secs: u64,
    /// The station records.
    stations: Vec<StationRecord>,
}

/// Configuration for the registry snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Path to the snapshot file.
    pub path: PathBuf,
}

impl SnapshotConfig {
    /// Create a config with the given snapshot path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self::new("data/stations.json")
    }
}

/// Disk store for registry snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    config: SnapshotConfig,
}

impl SnapshotStore {
    /// Create a snapshot store with the given config.
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    /// Try to load station records from the snapshot.
    ///
    /// Returns `None` if the file doesn't exist or doesn't parse.
    pub fn load(&self) -> Option<Vec<StationRecord>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let snapshot: SnapshotFile = serde_json::from_str(&contents).ok()?;
        Some(snapshot.stations)
    }

    /// Save station records to the snapshot file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[StationRecord]) -> Result<(), RegistryError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| RegistryError::Snapshot {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let snapshot = SnapshotFile {
            saved_at_secs: now,
            stations: stations.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| RegistryError::Snapshot {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| RegistryError::Snapshot {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| RegistryError::Snapshot {
            message: format!("failed to write snapshot file: {}", e),
        })?;

        Ok(())
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationId, SupplyLevels};
    use tempfile::tempdir;

    fn record(id: &str) -> StationRecord {
        StationRecord {
            id: StationId::new(id).unwrap(),
            display_name: format!("Station {id}"),
            latitude: 34.0522,
            longitude: -118.2437,
            supplies: SupplyLevels {
                water: 100,
                food: 50,
                medical: 10,
                capacity: 20,
            },
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        let store = SnapshotStore::new(SnapshotConfig::new(&path));

        let stations = vec![record("station-0001"), record("station-0002")];
        store.save(&stations).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, stations);
    }

    #[test]
    fn missing_snapshot_returns_none() {
        let store = SnapshotStore::new(SnapshotConfig::new("/nonexistent/path/stations.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_snapshot_returns_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SnapshotStore::new(SnapshotConfig::new(&path));
        assert!(store.load().is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("stations.json");
        let store = SnapshotStore::new(SnapshotConfig::new(&path));

        store.save(&[record("station-0001")]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_registry_snapshots_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        let store = SnapshotStore::new(SnapshotConfig::new(&path));

        store.save(&[]).unwrap();
        assert_eq!(store.load().unwrap(), vec![]);
    }
}
