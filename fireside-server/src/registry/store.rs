//! In-memory station store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{GeoPoint, StationId, StationRecord, SupplyLevels};

use super::error::RegistryError;

/// Capability token authorizing registry writes.
///
/// The authorization layer mints a token after verifying the caller may
/// manage stations; holding a value is the only way to reach the write
/// methods. Role state stays with the caller, never in the registry.
#[derive(Debug, Clone, Copy)]
pub struct WriteAccess(());

impl WriteAccess {
    /// Mint a token. Callers must have verified authorization first.
    pub fn granted() -> Self {
        WriteAccess(())
    }
}

/// Input for registering a station.
///
/// The location arrives as a validated [`GeoPoint`] (typically from an
/// address-search selection); the registry assigns the id.
#[derive(Debug, Clone)]
pub struct NewStation {
    pub display_name: String,
    pub location: GeoPoint,
    pub supplies: SupplyLevels,
}

/// Thread-safe station registry.
#[derive(Clone, Default)]
pub struct StationRegistry {
    inner: Arc<RwLock<HashMap<StationId, StationRecord>>>,
}

impl StationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with records (e.g. from a snapshot).
    ///
    /// Later records win on duplicate ids.
    pub fn from_records(records: Vec<StationRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// All stations, ordered by id for deterministic output.
    pub async fn list(&self) -> Vec<StationRecord> {
        let guard = self.inner.read().await;
        let mut records: Vec<StationRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    /// Look up a station by id.
    pub async fn get(&self, id: &StationId) -> Option<StationRecord> {
        let guard = self.inner.read().await;
        guard.get(id).cloned()
    }

    /// Number of registered stations.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Register a new station, assigning it a fresh id.
    pub async fn create(
        &self,
        _access: WriteAccess,
        new: NewStation,
    ) -> Result<StationRecord, RegistryError> {
        let mut guard = self.inner.write().await;

        let id = vacant_id(&guard);
        let record = StationRecord {
            id: id.clone(),
            display_name: new.display_name,
            latitude: new.location.latitude(),
            longitude: new.location.longitude(),
            supplies: new.supplies,
        };

        info!(%id, name = %record.display_name, "registered station");
        guard.insert(id, record.clone());

        Ok(record)
    }

    /// Replace a station's supply levels.
    pub async fn update_supplies(
        &self,
        _access: WriteAccess,
        id: &StationId,
        supplies: SupplyLevels,
    ) -> Result<StationRecord, RegistryError> {
        let mut guard = self.inner.write().await;

        let record = guard
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownStation(id.clone()))?;
        record.supplies = supplies;

        Ok(record.clone())
    }
}

/// Find the first unused generated id.
fn vacant_id(stations: &HashMap<StationId, StationRecord>) -> StationId {
    let mut n = stations.len() as u64 + 1;
    loop {
        if let Ok(id) = StationId::new(format!("station-{n:04}"))
            && !stations.contains_key(&id)
        {
            return id;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn new_station(name: &str) -> NewStation {
        NewStation {
            display_name: name.to_string(),
            location: point(34.0522, -118.2437),
            supplies: SupplyLevels {
                water: 100,
                food: 50,
                medical: 10,
                capacity: 20,
            },
        }
    }

    #[tokio::test]
    async fn create_and_get() {
        let registry = StationRegistry::new();
        let access = WriteAccess::granted();

        let created = registry
            .create(access, new_station("Echo Park Depot"))
            .await
            .unwrap();

        assert_eq!(created.display_name, "Echo Park Depot");
        assert_eq!(created.latitude, 34.0522);
        assert_eq!(created.longitude, -118.2437);

        let fetched = registry.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn created_ids_are_distinct() {
        let registry = StationRegistry::new();
        let access = WriteAccess::granted();

        let a = registry.create(access, new_station("A")).await.unwrap();
        let b = registry.create(access, new_station("B")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let registry = StationRegistry::new();
        let access = WriteAccess::granted();

        registry.create(access, new_station("B")).await.unwrap();
        registry.create(access, new_station("A")).await.unwrap();
        registry.create(access, new_station("C")).await.unwrap();

        let listed = registry.list().await;
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn update_supplies_replaces_levels() {
        let registry = StationRegistry::new();
        let access = WriteAccess::granted();

        let created = registry.create(access, new_station("A")).await.unwrap();

        let updated = registry
            .update_supplies(
                access,
                &created.id,
                SupplyLevels {
                    water: 5,
                    food: 6,
                    medical: 7,
                    capacity: 8,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.supplies.water, 5);
        assert_eq!(updated.supplies.capacity, 8);

        let fetched = registry.get(&created.id).await.unwrap();
        assert_eq!(fetched.supplies, updated.supplies);
    }

    #[tokio::test]
    async fn update_unknown_station_fails() {
        let registry = StationRegistry::new();
        let access = WriteAccess::granted();
        let id = StationId::new("station-9999").unwrap();

        let result = registry
            .update_supplies(access, &id, SupplyLevels::default())
            .await;

        assert_eq!(result, Err(RegistryError::UnknownStation(id)));
    }

    #[tokio::test]
    async fn from_records_deduplicates_by_id() {
        let id = StationId::new("station-0001").unwrap();
        let mk = |name: &str| StationRecord {
            id: id.clone(),
            display_name: name.to_string(),
            latitude: 1.0,
            longitude: 2.0,
            supplies: SupplyLevels::default(),
        };

        let registry = StationRegistry::from_records(vec![mk("old"), mk("new")]);

        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.get(&id).await.unwrap().display_name, "new");
    }

    #[tokio::test]
    async fn generated_ids_skip_snapshot_collisions() {
        let existing = StationRecord {
            id: StationId::new("station-0002").unwrap(),
            display_name: "existing".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            supplies: SupplyLevels::default(),
        };
        let registry = StationRegistry::from_records(vec![existing]);
        let access = WriteAccess::granted();

        let created = registry.create(access, new_station("fresh")).await.unwrap();

        assert_ne!(created.id.as_str(), "station-0002");
        assert_eq!(registry.len().await, 2);
    }
}
