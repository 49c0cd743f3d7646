//! Supply inventory counts.

use serde::{Deserialize, Serialize};

/// The resource kinds tracked at every station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyKind {
    /// Litres of drinking water.
    Water,
    /// Food portions.
    Food,
    /// Medical kits.
    Medical,
    /// Shelter capacity in people.
    Capacity,
}

/// Inventory levels for the four tracked resource kinds.
///
/// Counts are non-negative by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplyLevels {
    pub water: u32,
    pub food: u32,
    pub medical: u32,
    pub capacity: u32,
}

impl SupplyLevels {
    /// The level for a single resource kind.
    pub fn get(&self, kind: SupplyKind) -> u32 {
        match kind {
            SupplyKind::Water => self.water,
            SupplyKind::Food => self.food,
            SupplyKind::Medical => self.medical,
            SupplyKind::Capacity => self.capacity,
        }
    }
}
