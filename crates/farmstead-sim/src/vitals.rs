//! Daily vital mechanics applied to each animal.
//!
//! Once per day every animal ages, gets a little hungrier, and has its
//! health adjusted by its hunger level. The per-day transitions are:
//!
//! - Age increments by 1.
//! - Hunger increases by a small random amount (1--2).
//! - Hunger above the damage threshold erodes health in proportion to the
//!   excess; low hunger lets health recover toward the 100 cap.
//! - Hunger at the starvation threshold or health at the lethal floor
//!   kills the animal.
//!
//! All arithmetic uses checked or saturating operations. No panics, no
//! silent overflow.

use rand::Rng;

use farmstead_types::{Animal, DeathCause};

use crate::config::HerdConfig;
use crate::error::SimError;

/// Maximum health an animal can have.
pub const HEALTH_CAP: u32 = 100;

/// Result of applying one day of vital mechanics to an animal.
///
/// If the animal died this day, `death` carries the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalOutcome {
    /// If the animal died during this day, the cause of death.
    pub death: Option<DeathCause>,
}

/// Apply one day of vital mechanics to an animal.
///
/// # Order of operations
///
/// 1. Increment age
/// 2. Increase hunger by a random 1--2
/// 3. Apply hunger damage when hunger exceeds the threshold
/// 4. Apply health recovery when hunger is at or below the comfort level
/// 5. Check starvation, then lethal health
///
/// # Errors
///
/// Returns [`SimError::ArithmeticOverflow`] if age or hunger would
/// overflow `u32`.
pub fn apply_daily_tick(
    animal: &mut Animal,
    config: &HerdConfig,
    rng: &mut impl Rng,
) -> Result<VitalOutcome, SimError> {
    // 1. Age the animal.
    animal.age = animal
        .age
        .checked_add(1)
        .ok_or_else(|| SimError::overflow("age increment"))?;

    // 2. Hunger creeps up.
    let gain = rng.random_range(config.daily_hunger_min..=config.daily_hunger_max);
    animal.hunger = animal
        .hunger
        .checked_add(gain)
        .ok_or_else(|| SimError::overflow("hunger increase"))?;

    // 3. Excess hunger erodes health: (hunger - grace) / 2.
    if animal.hunger > config.hunger_damage_threshold {
        let excess = animal.hunger.saturating_sub(config.hunger_damage_grace);
        let loss = excess.checked_div(2).unwrap_or(0);
        animal.health = animal.health.saturating_sub(loss);
    }

    // 4. A well-fed animal heals, capped at 100.
    if animal.hunger <= config.comfort_hunger {
        let healed = animal
            .health
            .checked_add(config.heal_rate)
            .ok_or_else(|| SimError::overflow("health recovery"))?;
        animal.health = healed.min(HEALTH_CAP);
    }

    // 5. Death checks: starvation takes precedence over poor health.
    let death = if animal.hunger >= config.starvation_hunger {
        Some(DeathCause::Starvation)
    } else if animal.health <= config.lethal_health {
        Some(DeathCause::PoorHealth)
    } else {
        None
    };

    Ok(VitalOutcome { death })
}

/// Apply the effect of eating `portion` units of feed.
///
/// Hunger drops by the portion (floored at 0) and health rises by
/// `portion * feeding_heal_factor`, capped at 100.
///
/// # Errors
///
/// Returns [`SimError::ArithmeticOverflow`] if the health gain
/// computation overflows.
pub fn apply_feeding(
    animal: &mut Animal,
    portion: u32,
    config: &HerdConfig,
) -> Result<(), SimError> {
    animal.hunger = animal.hunger.saturating_sub(portion);

    let gain = portion
        .checked_mul(config.feeding_heal_factor)
        .ok_or_else(|| SimError::overflow("feeding health gain"))?;
    let healed = animal
        .health
        .checked_add(gain)
        .ok_or_else(|| SimError::overflow("feeding health total"))?;
    animal.health = healed.min(HEALTH_CAP);

    Ok(())
}
