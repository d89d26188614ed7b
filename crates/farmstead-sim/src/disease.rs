//! Disease outbreak, progression, recovery, and death.
//!
//! One daily cycle does three things, in order:
//!
//! 1. **Outbreak roll**: with probability
//!    `base_outbreak_rate + active_count * escalation_rate`, a uniformly
//!    chosen disease strikes a uniformly chosen eligible animal (eligible:
//!    hungry or already weak). No eligible animal means no outbreak.
//! 2. **Progression**: every active record (including one created this
//!    day) costs its host one point of health.
//! 3. **Recovery or death**: a well-fed, reasonably healthy host rolls for
//!    recovery; recovery is checked *before* the death threshold, so an
//!    animal that recovers this day cannot also die of the disease this
//!    day. A host at or below the lethal threshold dies, and its roster
//!    entry and disease record are removed together.
//!
//! Records whose host no longer exists are pruned as they are visited.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use farmstead_types::{Animal, DiseaseKind, DiseaseRecord, Species};

use crate::config::DiseaseConfig;

/// A recovery that occurred during the daily cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    /// The recovered animal's name.
    pub animal_name: String,
    /// The recovered animal's species.
    pub species: Species,
    /// The disease it shook off.
    pub disease: DiseaseKind,
}

/// Everything that happened in one daily disease cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiseaseDayOutcome {
    /// A new outbreak, if one struck today.
    pub outbreak: Option<DiseaseRecord>,
    /// Animals that recovered today.
    pub recoveries: Vec<Recovery>,
    /// Animals the disease killed today, with the killing disease.
    /// The animals are already removed from the roster.
    pub deaths: Vec<(Animal, DiseaseKind)>,
}

/// Run one daily disease cycle over the roster.
///
/// Mutates `animals` (health damage, removal of the dead) and `diseases`
/// (new outbreak, pruned recoveries/deaths/danglers) in place and reports
/// the notable transitions.
pub fn run_daily_cycle(
    animals: &mut Vec<Animal>,
    diseases: &mut Vec<DiseaseRecord>,
    day: u64,
    config: &DiseaseConfig,
    rng: &mut impl Rng,
) -> DiseaseDayOutcome {
    let mut outcome = DiseaseDayOutcome::default();

    // --- Outbreak roll ---
    if let Some(record) = roll_outbreak(animals, diseases, day, config, rng) {
        debug!(disease = %record.kind, animal = %record.animal_name, "disease outbreak");
        diseases.push(record.clone());
        outcome.outbreak = Some(record);
    }

    // --- Progression over every active record ---
    let records = std::mem::take(diseases);
    for record in records {
        let Some(idx) = animals
            .iter()
            .position(|animal| animal.name == record.animal_name)
        else {
            // Host is gone; the record goes with it.
            continue;
        };
        let Some(host) = animals.get_mut(idx) else {
            continue;
        };

        host.health = host.health.saturating_sub(config.daily_damage);

        // Recovery is checked before the death threshold.
        let can_recover =
            host.hunger <= config.recovery_hunger && host.health >= config.recovery_health;
        if can_recover && rng.random_bool(config.recovery_chance.clamp(0.0, 1.0)) {
            outcome.recoveries.push(Recovery {
                animal_name: host.name.clone(),
                species: host.species,
                disease: record.kind,
            });
            continue;
        }

        if host.health <= config.lethal_health {
            let dead = animals.remove(idx);
            outcome.deaths.push((dead, record.kind));
            continue;
        }

        diseases.push(record);
    }

    outcome
}

/// Roll for a new outbreak. Returns the new record without inserting it.
fn roll_outbreak(
    animals: &[Animal],
    diseases: &[DiseaseRecord],
    day: u64,
    config: &DiseaseConfig,
    rng: &mut impl Rng,
) -> Option<DiseaseRecord> {
    let active = u32::try_from(diseases.len()).unwrap_or(u32::MAX);
    let probability = config
        .escalation_rate
        .mul_add(f64::from(active), config.base_outbreak_rate)
        .clamp(0.0, 1.0);

    if !rng.random_bool(probability) {
        return None;
    }

    let kind = DiseaseKind::ALL.choose(rng).copied()?;

    let eligible: Vec<&Animal> = animals
        .iter()
        .filter(|animal| {
            animal.hunger > config.eligible_hunger || animal.health < config.eligible_health
        })
        .collect();
    let host = eligible.choose(rng)?;

    Some(DiseaseRecord {
        kind,
        animal_name: host.name.clone(),
        start_day: day,
    })
}
