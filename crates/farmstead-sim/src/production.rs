//! Daily resource production.
//!
//! Every animal below the hunger ceiling produces its species' resource:
//!
//! ```text
//! yield = max(minimum, base_rate + health * health_factor
//!                      - max(0, hunger - penalty_threshold) * penalty_factor)
//! ```
//!
//! Production is the only deterministic phase of the day: given the
//! roster it always yields the same amounts. Weather's declared impact
//! multipliers are intentionally not applied here (see
//! [`crate::weather`]).

use rust_decimal::Decimal;

use farmstead_types::{Animal, Resource};

use crate::config::ProductionConfig;
use crate::error::SimError;

/// One animal's daily output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldReport {
    /// The producing animal's name.
    pub animal_name: String,
    /// The resource produced.
    pub resource: Resource,
    /// How much was produced.
    pub amount: Decimal,
}

/// Compute the daily yields for the whole roster.
///
/// Animals at or above the hunger ceiling are skipped entirely. The
/// caller credits the reported amounts to the ledger.
///
/// # Errors
///
/// Returns [`SimError::ArithmeticOverflow`] if a yield computation
/// leaves the [`Decimal`] domain.
pub fn daily_yields(
    animals: &[Animal],
    config: &ProductionConfig,
) -> Result<Vec<YieldReport>, SimError> {
    let mut reports = Vec::with_capacity(animals.len());

    for animal in animals {
        if animal.hunger >= config.hunger_ceiling {
            continue;
        }

        let health_bonus = Decimal::from(animal.health)
            .checked_mul(config.health_factor)
            .ok_or_else(|| SimError::overflow("health bonus"))?;

        let excess_hunger = animal.hunger.saturating_sub(config.penalty_threshold);
        let hunger_penalty = Decimal::from(excess_hunger)
            .checked_mul(config.penalty_factor)
            .ok_or_else(|| SimError::overflow("hunger penalty"))?;

        let base = config.base_rate(animal.species);
        let raw = base
            .checked_add(health_bonus)
            .and_then(|v| v.checked_sub(hunger_penalty))
            .ok_or_else(|| SimError::overflow("yield total"))?;

        reports.push(YieldReport {
            animal_name: animal.name.clone(),
            resource: animal.species.product(),
            amount: raw.max(config.minimum_yield),
        });
    }

    Ok(reports)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use farmstead_types::Species;

    use super::*;

    fn animal(species: Species, name: &str, hunger: u32, health: u32) -> Animal {
        Animal {
            species,
            name: name.to_owned(),
            hunger,
            health,
            age: 1,
            last_breeding_day: None,
        }
    }

    #[test]
    fn healthy_chicken_yields_base_plus_health_bonus() {
        let config = ProductionConfig::default();
        let roster = vec![animal(Species::Chicken, "Clucky", 0, 100)];

        let reports = daily_yields(&roster, &config).unwrap();

        let report = reports.first().unwrap();
        assert_eq!(report.resource, Resource::Eggs);
        // 3 + 100 * 0.02 = 5
        assert_eq!(report.amount, dec!(5));
    }

    #[test]
    fn hunger_past_the_penalty_threshold_cuts_the_yield() {
        let config = ProductionConfig::default();
        let roster = vec![animal(Species::Cow, "Bessie", 7, 50)];

        let reports = daily_yields(&roster, &config).unwrap();

        // 4 + 50 * 0.02 - (7 - 5) * 0.1 = 4.8
        assert_eq!(reports.first().unwrap().amount, dec!(4.8));
    }

    #[test]
    fn very_hungry_animals_produce_nothing() {
        let config = ProductionConfig::default();
        let roster = vec![animal(Species::Chicken, "Clucky", 8, 100)];

        let reports = daily_yields(&roster, &config).unwrap();

        assert!(reports.is_empty());
    }

    #[test]
    fn yield_never_drops_below_the_minimum() {
        let config = ProductionConfig::default();
        // 3 + 0 * 0.02 - (7 - 5) * 0.1 = 2.8 stays above 1; force lower
        // with zero health and maximal in-range hunger.
        let roster = vec![animal(Species::Chicken, "Runt", 7, 0)];

        let reports = daily_yields(&roster, &config).unwrap();

        let amount = reports.first().unwrap().amount;
        assert!(amount >= dec!(1), "floored at the minimum, got {amount}");
    }

    #[test]
    fn each_species_produces_its_own_resource() {
        let config = ProductionConfig::default();
        let roster = vec![
            animal(Species::Chicken, "Clucky", 0, 100),
            animal(Species::Cow, "Bessie", 0, 100),
        ];

        let reports = daily_yields(&roster, &config).unwrap();

        let resources: Vec<Resource> = reports.iter().map(|r| r.resource).collect();
        assert_eq!(resources, vec![Resource::Eggs, Resource::Milk]);
    }
}
