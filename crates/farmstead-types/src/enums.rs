//! Enumeration types for the Farmstead simulation.
//!
//! Every closed set in the farm's data model lives here: resources, animal
//! species, weather patterns, disease kinds, achievements, and death causes.
//! All variants serialize in `snake_case` to match the wire protocol the
//! dashboard consumes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource tracked in the farm's ledger.
///
/// `Eggs`, `Milk`, and `Feed` are tradeable on the market; `Money` is the
/// medium of exchange and cannot itself be bought or sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Eggs laid by chickens.
    Eggs,
    /// Milk produced by cows.
    Milk,
    /// Animal feed, consumed when feeding the herd.
    Feed,
    /// The farm's cash balance.
    Money,
}

impl Resource {
    /// Whether this resource can be bought and sold on the market.
    pub const fn is_tradeable(self) -> bool {
        !matches!(self, Self::Money)
    }

    /// The three tradeable resources, in ledger order.
    pub const TRADEABLE: [Self; 3] = [Self::Eggs, Self::Milk, Self::Feed];

    /// Parse a lowercase wire name (`"eggs"`, `"milk"`, `"feed"`, `"money"`).
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "eggs" => Some(Self::Eggs),
            "milk" => Some(Self::Milk),
            "feed" => Some(Self::Feed),
            "money" => Some(Self::Money),
            _ => None,
        }
    }

    /// The lowercase wire name of this resource.
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Eggs => "eggs",
            Self::Milk => "milk",
            Self::Feed => "feed",
            Self::Money => "money",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// An animal species kept on the farm.
///
/// The species fixes which resource the animal produces and what it costs
/// to purchase a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Egg-layer.
    Chicken,
    /// Milk-producer.
    Cow,
}

impl Species {
    /// The resource this species produces each day.
    pub const fn product(self) -> Resource {
        match self {
            Self::Chicken => Resource::Eggs,
            Self::Cow => Resource::Milk,
        }
    }

    /// Purchase price for a new animal of this species, in whole money units.
    pub const fn price_units(self) -> u32 {
        match self {
            Self::Chicken => 50,
            Self::Cow => 200,
        }
    }

    /// Parse a lowercase wire name (`"chicken"`, `"cow"`).
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "chicken" => Some(Self::Chicken),
            "cow" => Some(Self::Cow),
            _ => None,
        }
    }

    /// The lowercase wire name of this species.
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Chicken => "chicken",
            Self::Cow => "cow",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// The weather over the farm on a given day.
///
/// Exactly one value is active at a time. Transitions are a memoryless
/// weighted draw each day; the weights live with the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// Clear skies.
    Sunny,
    /// Steady rain.
    Rainy,
    /// Heavy storm.
    Stormy,
    /// Prolonged extreme heat.
    Heatwave,
}

// ---------------------------------------------------------------------------
// Diseases
// ---------------------------------------------------------------------------

/// A disease an animal can contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum DiseaseKind {
    /// Avian influenza.
    AvianFlu,
    /// Hoof rot.
    HoofRot,
    /// Swine fever.
    SwineFever,
}

impl DiseaseKind {
    /// All known disease kinds, used for uniform outbreak selection.
    pub const ALL: [Self; 3] = [Self::AvianFlu, Self::HoofRot, Self::SwineFever];

    /// The lowercase wire name of this disease.
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::AvianFlu => "avian_flu",
            Self::HoofRot => "hoof_rot",
            Self::SwineFever => "swine_fever",
        }
    }
}

impl std::fmt::Display for DiseaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// An achievement a player can unlock.
///
/// The unlocked set only grows; an identifier is inserted at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Feed stock reached 100 units.
    FeedPurchased,
    /// Money balance reached 1000.
    Millionaire,
    /// The roster grew to 10 animals.
    Prolific,
}

// ---------------------------------------------------------------------------
// Death causes
// ---------------------------------------------------------------------------

/// Why an animal left the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Hunger crossed the starvation threshold.
    Starvation,
    /// Health fell to the lethal floor.
    PoorHealth,
    /// A disease drove health below its death threshold.
    Disease(DiseaseKind),
}

impl std::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Starvation => f.write_str("starvation"),
            Self::PoorHealth => f.write_str("poor_health"),
            Self::Disease(kind) => f.write_str(kind.as_wire()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_wire_names_round_trip() {
        for resource in [Resource::Eggs, Resource::Milk, Resource::Feed, Resource::Money] {
            assert_eq!(Resource::from_wire(resource.as_wire()), Some(resource));
        }
        assert_eq!(Resource::from_wire("gold"), None);
    }

    #[test]
    fn money_is_not_tradeable() {
        assert!(!Resource::Money.is_tradeable());
        for resource in Resource::TRADEABLE {
            assert!(resource.is_tradeable());
        }
    }

    #[test]
    fn species_product_mapping_is_fixed() {
        assert_eq!(Species::Chicken.product(), Resource::Eggs);
        assert_eq!(Species::Cow.product(), Resource::Milk);
    }

    #[test]
    fn weather_serializes_snake_case() {
        let json = serde_json::to_string(&Weather::Heatwave).unwrap_or_default();
        assert_eq!(json, "\"heatwave\"");
    }

    #[test]
    fn death_cause_display_matches_wire() {
        assert_eq!(DeathCause::Starvation.to_string(), "starvation");
        assert_eq!(DeathCause::PoorHealth.to_string(), "poor_health");
        assert_eq!(
            DeathCause::Disease(DiseaseKind::HoofRot).to_string(),
            "hoof_rot"
        );
    }
}
