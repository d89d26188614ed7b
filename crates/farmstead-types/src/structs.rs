//! Core entity structs for the Farmstead simulation.
//!
//! These are the shapes that cross crate boundaries: the animal roster
//! entry, the disease tracking record, and the externally-visible world
//! snapshot. The snapshot's field names are the serialization contract
//! with the dashboard and any persistence collaborator.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Achievement, DiseaseKind, Resource, Species, Weather};

// ---------------------------------------------------------------------------
// Animal
// ---------------------------------------------------------------------------

/// One animal on the roster.
///
/// Names are unique within the roster at creation time and are how
/// diseases and breeding cooldowns refer back to an animal. `health`
/// stays within 0--100; `hunger` grows without bound until feeding or
/// death intervenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Animal {
    /// The animal's species (fixes its product and purchase price).
    pub species: Species,
    /// Unique name within the roster.
    pub name: String,
    /// Hunger level; 0 means fully fed.
    pub hunger: u32,
    /// Health in the range 0--100.
    pub health: u32,
    /// Age in simulated days.
    pub age: u32,
    /// The day this animal last bred, if ever.
    pub last_breeding_day: Option<u64>,
}

impl Animal {
    /// Create a newborn or newly-purchased animal: full health, zero
    /// hunger, zero age.
    pub const fn fresh(species: Species, name: String) -> Self {
        Self {
            species,
            name,
            hunger: 0,
            health: 100,
            age: 0,
            last_breeding_day: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Disease record
// ---------------------------------------------------------------------------

/// An active disease afflicting one animal.
///
/// `animal_name` is a back-reference, not ownership: when the referenced
/// animal dies or disappears, the record is pruned in the same tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DiseaseRecord {
    /// Which disease this is.
    pub kind: DiseaseKind,
    /// Name of the afflicted animal.
    pub animal_name: String,
    /// The day the outbreak started.
    pub start_day: u64,
}

// ---------------------------------------------------------------------------
// World snapshot
// ---------------------------------------------------------------------------

/// An immutable point-in-time projection of the whole farm.
///
/// Produced on demand for transport; never exposes state mid-mutation.
/// Quantities and prices serialize as decimal strings (exact values, no
/// float drift).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Resource quantities, including the money balance.
    #[ts(type = "Record<string, string>")]
    pub resources: BTreeMap<Resource, Decimal>,
    /// The animal roster.
    pub animals: Vec<Animal>,
    /// Today's weather.
    pub weather: Weather,
    /// Current market price per tradeable resource.
    #[ts(type = "Record<string, string>")]
    pub market_prices: BTreeMap<Resource, Decimal>,
    /// Achievements unlocked so far.
    pub achievements: BTreeSet<Achievement>,
    /// Active disease records.
    pub diseases: Vec<DiseaseRecord>,
    /// Recent market price vectors, oldest first, at most 30 entries.
    #[ts(type = "Array<Record<string, string>>")]
    pub market_history: Vec<BTreeMap<Resource, Decimal>>,
    /// Days elapsed since the farm was founded.
    pub total_days: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn fresh_animal_starts_healthy() {
        let animal = Animal::fresh(Species::Cow, String::from("Bessie"));
        assert_eq!(animal.health, 100);
        assert_eq!(animal.hunger, 0);
        assert_eq!(animal.age, 0);
        assert_eq!(animal.last_breeding_day, None);
    }

    #[test]
    fn snapshot_serializes_contract_field_names() {
        let snapshot = WorldSnapshot {
            resources: BTreeMap::from([(Resource::Money, Decimal::from(200))]),
            animals: vec![Animal::fresh(Species::Chicken, String::from("Clucky"))],
            weather: Weather::Sunny,
            market_prices: BTreeMap::from([(Resource::Eggs, Decimal::new(15, 1))]),
            achievements: BTreeSet::new(),
            diseases: Vec::new(),
            market_history: Vec::new(),
            total_days: 0,
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        for field in [
            "resources",
            "animals",
            "weather",
            "market_prices",
            "achievements",
            "diseases",
            "market_history",
            "total_days",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["weather"], "sunny");
        assert_eq!(value["resources"]["money"], "200");
    }
}
