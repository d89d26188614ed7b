//! Notable-transition records handed to the event sink.
//!
//! Every event the simulation considers worth telling an observability
//! collaborator about is one [`FarmEvent`] variant, wrapped in an
//! [`EventRecord`] envelope carrying an id, the simulation day, and a
//! wall-clock timestamp. Recording is strictly best-effort: nothing in
//! the simulation depends on whether an event was delivered.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Achievement, DeathCause, DiseaseKind, Resource, Species, Weather};

/// A notable transition in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FarmEvent {
    /// The weather changed between days.
    WeatherChanged {
        /// Yesterday's weather.
        from: Weather,
        /// Today's weather.
        to: Weather,
    },
    /// An animal produced its daily yield.
    ResourceProduced {
        /// Producing animal's name.
        animal: String,
        /// The resource produced.
        resource: Resource,
        /// Quantity produced.
        #[ts(type = "string")]
        amount: Decimal,
    },
    /// A new disease broke out on an animal.
    DiseaseOutbreak {
        /// The disease kind.
        disease: DiseaseKind,
        /// The afflicted animal's name.
        animal: String,
    },
    /// An animal shook off its disease.
    AnimalRecovered {
        /// The animal's name.
        name: String,
        /// The animal's species.
        species: Species,
        /// The disease it recovered from.
        disease: DiseaseKind,
    },
    /// An animal died and left the roster.
    AnimalDied {
        /// The animal's name.
        name: String,
        /// The animal's species.
        species: Species,
        /// What killed it.
        cause: DeathCause,
    },
    /// Market prices drifted for the day.
    MarketUpdated {
        /// The new price vector.
        #[ts(type = "Record<string, string>")]
        prices: BTreeMap<Resource, Decimal>,
    },
    /// A player bought feed.
    FeedPurchased {
        /// Units of feed bought.
        amount: u32,
        /// Total money spent.
        #[ts(type = "string")]
        cost: Decimal,
    },
    /// A player fed the herd.
    AnimalsFed {
        /// Names of the animals that received feed.
        animals: Vec<String>,
    },
    /// A player sold a resource.
    ItemSold {
        /// The resource sold.
        item: Resource,
        /// Units sold.
        quantity: u32,
        /// Money credited.
        #[ts(type = "string")]
        earnings: Decimal,
    },
    /// Two animals bred a newborn.
    AnimalBred {
        /// First parent's name.
        parent1: String,
        /// Second parent's name.
        parent2: String,
        /// The newborn's generated name.
        baby: String,
    },
    /// A player bought a new animal.
    AnimalPurchased {
        /// The species bought.
        species: Species,
        /// The new animal's name.
        name: String,
        /// Money spent.
        #[ts(type = "string")]
        cost: Decimal,
    },
    /// An achievement was unlocked for the first time.
    AchievementUnlocked {
        /// The achievement identifier.
        name: Achievement,
    },
    /// A full simulated day finished.
    DayCompleted {
        /// The day number that just completed.
        day: u64,
    },
}

/// Envelope around a [`FarmEvent`] as handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventRecord {
    /// Unique event identifier (time-ordered).
    pub id: uuid::Uuid,
    /// The simulation day the event occurred on.
    pub day: u64,
    /// Wall-clock time the event was recorded.
    pub recorded_at: DateTime<Utc>,
    /// The event payload.
    #[serde(flatten)]
    pub event: FarmEvent,
}

impl EventRecord {
    /// Wrap an event in a fresh envelope stamped with the current time.
    pub fn new(day: u64, event: FarmEvent) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            day,
            recorded_at: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_snake_case_tags() {
        let event = FarmEvent::WeatherChanged {
            from: Weather::Sunny,
            to: Weather::Stormy,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "weather_changed");
        assert_eq!(value["from"], "sunny");
        assert_eq!(value["to"], "stormy");
    }

    #[test]
    fn record_envelope_flattens_the_event() {
        let record = EventRecord::new(
            4,
            FarmEvent::AnimalDied {
                name: String::from("Clucky"),
                species: Species::Chicken,
                cause: DeathCause::Starvation,
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["day"], 4);
        assert_eq!(value["event"], "animal_died");
        assert_eq!(value["cause"], "starvation");
        assert!(value.get("id").is_some());
    }
}
