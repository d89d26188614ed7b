//! Tunable constants for the daily rules.
//!
//! The [`SimTuning`] struct bundles every knob the rules engine reads so
//! that callers (tick pipeline, tests) can override defaults in one place.
//! Defaults reproduce the farm's long-standing balance: slow hunger, mild
//! diseases, forgiving death thresholds, and a feed market that inflates
//! over time.

use rust_decimal::Decimal;

/// Tunables for animal vitals applied once per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HerdConfig {
    /// Minimum daily hunger gain (default: 1).
    pub daily_hunger_min: u32,

    /// Maximum daily hunger gain, inclusive (default: 2).
    pub daily_hunger_max: u32,

    /// Hunger above which health decays (default: 5).
    pub hunger_damage_threshold: u32,

    /// Grace offset in the decay formula `(hunger - grace) / 2`
    /// (default: 4).
    pub hunger_damage_grace: u32,

    /// Hunger at or below which health recovers (default: 2).
    pub comfort_hunger: u32,

    /// Health recovered per comfortable day, capped at 100 (default: 3).
    pub heal_rate: u32,

    /// Hunger at or above which the animal starves (default: 15).
    pub starvation_hunger: u32,

    /// Health at or below which the animal dies (default: 10).
    pub lethal_health: u32,

    /// Health gained per unit of feed eaten (default: 2).
    pub feeding_heal_factor: u32,
}

impl Default for HerdConfig {
    fn default() -> Self {
        Self {
            daily_hunger_min: 1,
            daily_hunger_max: 2,
            hunger_damage_threshold: 5,
            hunger_damage_grace: 4,
            comfort_hunger: 2,
            heal_rate: 3,
            starvation_hunger: 15,
            lethal_health: 10,
            feeding_heal_factor: 2,
        }
    }
}

/// Tunables for disease outbreak, progression, and recovery.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseConfig {
    /// Outbreak probability with no active diseases (default: 0.03).
    pub base_outbreak_rate: f64,

    /// Additional outbreak probability per active disease (default: 0.02).
    pub escalation_rate: f64,

    /// Hunger above which an animal is outbreak-eligible (default: 5).
    pub eligible_hunger: u32,

    /// Health below which an animal is outbreak-eligible (default: 40).
    pub eligible_health: u32,

    /// Health lost per day while diseased (default: 1).
    pub daily_damage: u32,

    /// Hunger at or below which recovery becomes possible (default: 3).
    pub recovery_hunger: u32,

    /// Health at or above which recovery becomes possible (default: 50).
    pub recovery_health: u32,

    /// Daily recovery probability once eligible (default: 0.4).
    pub recovery_chance: f64,

    /// Health at or below which a diseased animal dies (default: 15).
    pub lethal_health: u32,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            base_outbreak_rate: 0.03,
            escalation_rate: 0.02,
            eligible_hunger: 5,
            eligible_health: 40,
            daily_damage: 1,
            recovery_hunger: 3,
            recovery_health: 50,
            recovery_chance: 0.4,
            lethal_health: 15,
        }
    }
}

/// Tunables for the daily market drift.
///
/// Drift magnitudes are expressed in basis points (1/10000) so the random
/// draw stays in integers and converts exactly to [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Maximum retained price-history entries (default: 30).
    pub history_cap: usize,

    /// Price floor for goods other than feed (default: 0.5).
    pub price_floor: Decimal,

    /// Feed's base price, from which its rising floor grows
    /// (default: 0.75).
    pub feed_base_price: Decimal,

    /// Days for the feed floor to double: floor = base * (1 + day / this)
    /// (default: 20).
    pub feed_floor_divisor: u64,

    /// Days for the feed inflation factor to grow by 1x:
    /// `time_factor = 1 + day / this` (default: 30).
    pub feed_inflation_divisor: u64,

    /// Cap on the feed inflation factor (default: 5).
    pub feed_time_factor_cap: Decimal,

    /// Lower drift bound for ordinary goods, basis points (default: -2500).
    pub drift_min_bp: i64,

    /// Upper drift bound for ordinary goods, basis points (default: 3500).
    pub drift_max_bp: i64,

    /// Lower drift bound for feed before inflation scaling (default: -500).
    pub feed_drift_min_bp: i64,

    /// Upper drift bound for feed before inflation scaling (default: 2500).
    pub feed_drift_max_bp: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            history_cap: 30,
            price_floor: Decimal::new(5, 1),
            feed_base_price: Decimal::new(75, 2),
            feed_floor_divisor: 20,
            feed_inflation_divisor: 30,
            feed_time_factor_cap: Decimal::from(5),
            drift_min_bp: -2500,
            drift_max_bp: 3500,
            feed_drift_min_bp: -500,
            feed_drift_max_bp: 2500,
        }
    }
}

/// Tunables for daily resource production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionConfig {
    /// Hunger at or above which an animal produces nothing (default: 8).
    pub hunger_ceiling: u32,

    /// Hunger above which the yield penalty applies (default: 5).
    pub penalty_threshold: u32,

    /// Yield lost per point of excess hunger (default: 0.1).
    pub penalty_factor: Decimal,

    /// Yield gained per point of health (default: 0.02).
    pub health_factor: Decimal,

    /// Minimum yield for any producing animal (default: 1).
    pub minimum_yield: Decimal,

    /// Base daily yield for a chicken (default: 3).
    pub chicken_base_rate: Decimal,

    /// Base daily yield for a cow (default: 4).
    pub cow_base_rate: Decimal,
}

impl ProductionConfig {
    /// The base daily yield for the given species.
    pub const fn base_rate(&self, species: farmstead_types::Species) -> Decimal {
        match species {
            farmstead_types::Species::Chicken => self.chicken_base_rate,
            farmstead_types::Species::Cow => self.cow_base_rate,
        }
    }
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            hunger_ceiling: 8,
            penalty_threshold: 5,
            penalty_factor: Decimal::new(1, 1),
            health_factor: Decimal::new(2, 2),
            minimum_yield: Decimal::ONE,
            chicken_base_rate: Decimal::from(3),
            cow_base_rate: Decimal::from(4),
        }
    }
}

/// Tunables for breeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedingConfig {
    /// Hunger above which a parent is too hungry to breed (default: 3).
    pub max_parent_hunger: u32,

    /// Cooldown applied to both parents after breeding, in days
    /// (default: 5).
    pub cooldown_days: u32,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            max_parent_hunger: 3,
            cooldown_days: 5,
        }
    }
}

/// Every tunable the rules engine reads, bundled for the tick pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimTuning {
    /// Animal vitals knobs.
    pub herd: HerdConfig,
    /// Disease knobs.
    pub disease: DiseaseConfig,
    /// Market drift knobs.
    pub market: MarketConfig,
    /// Production knobs.
    pub production: ProductionConfig,
    /// Breeding knobs.
    pub breeding: BreedingConfig,
}
