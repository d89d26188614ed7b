//! The daily tick: five phases that carry the farm forward one day.
//!
//! [`advance_day`] executes, in fixed order:
//!
//! 1. **Weather transition** -- memoryless weighted draw; a change event
//!    is recorded only when the value actually changes.
//! 2. **Disease** -- outbreak roll, progression, recovery-before-death.
//! 3. **Market update** -- price drift and history append/evict.
//! 4. **Time effects** -- aging, hunger, hunger-driven health changes,
//!    starvation/poor-health deaths, cooldown countdown, and pruning of
//!    disease records whose host died this day.
//! 5. **Production** -- per-animal yields credited to the ledger.
//!
//! The order is load-bearing: later phases read state produced by
//! earlier ones (production sees post-death rosters, the market sees the
//! incremented day counter). [`advance`] applies several days as one
//! atomic batch; no snapshot is taken mid-batch.

use std::collections::BTreeMap;

use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use farmstead_sim::{SimError, SimTuning, disease, production, vitals, weather};
use farmstead_types::{DeathCause, DiseaseRecord, FarmEvent, Resource, Weather};

use crate::events::{self, EventSink};
use crate::world::{FarmWorld, LedgerError};

/// Errors that can occur during tick execution.
///
/// Any of these means the day could not be applied cleanly; callers
/// treat them as fatal rather than continuing with a half-advanced
/// world.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A rules-engine computation failed.
    #[error("simulation rule failed: {source}")]
    Sim {
        /// The underlying simulation error.
        #[from]
        source: SimError,
    },

    /// A ledger mutation failed.
    #[error("ledger fault: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// The day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u64::MAX")]
    DayOverflow,
}

/// Summary of a single day's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    /// The day number that was executed.
    pub day: u64,
    /// The weather during this day.
    pub weather: Weather,
    /// A new outbreak, if one struck.
    pub outbreak: Option<DiseaseRecord>,
    /// Names of animals that recovered from disease.
    pub recoveries: Vec<String>,
    /// Animals that died this day, with causes.
    pub deaths: Vec<(String, DeathCause)>,
    /// Resources produced this day, by resource.
    pub produced: BTreeMap<Resource, Decimal>,
    /// Number of living animals at end of day.
    pub animals_alive: u32,
}

/// Execute one complete day of the simulation.
///
/// # Errors
///
/// Returns [`TickError`] if any phase fails; the error is fatal to the
/// run (see the crate docs on error classes).
pub fn advance_day(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    rng: &mut impl Rng,
    sink: &dyn EventSink,
) -> Result<DaySummary, TickError> {
    world.total_days = world
        .total_days
        .checked_add(1)
        .ok_or(TickError::DayOverflow)?;
    let day = world.total_days;

    // --- Phase 1: Weather transition ---
    phase_weather(world, rng, sink);

    // --- Phase 2: Disease spread & progression ---
    let disease_outcome = phase_disease(world, tuning, rng, sink);

    // --- Phase 3: Market update ---
    phase_market(world, tuning, rng, sink)?;

    // --- Phase 4: Time effects ---
    let vital_deaths = phase_time_effects(world, tuning, rng, sink)?;

    // --- Phase 5: Production ---
    let produced = phase_production(world, tuning, sink)?;

    events::emit(sink, day, FarmEvent::DayCompleted { day });

    let mut deaths: Vec<(String, DeathCause)> = disease_outcome
        .deaths
        .iter()
        .map(|(animal, kind)| (animal.name.clone(), DeathCause::Disease(*kind)))
        .collect();
    deaths.extend(vital_deaths);

    let animals_alive = u32::try_from(world.animals.len()).unwrap_or(u32::MAX);
    info!(
        day,
        weather = ?world.weather,
        animals_alive,
        deaths = deaths.len(),
        "day advanced"
    );

    Ok(DaySummary {
        day,
        weather: world.weather,
        outbreak: disease_outcome.outbreak,
        recoveries: disease_outcome
            .recoveries
            .iter()
            .map(|recovery| recovery.animal_name.clone())
            .collect(),
        deaths,
        produced,
        animals_alive,
    })
}

/// Apply `days` consecutive days as one atomic batch.
///
/// The caller holds the world exclusively for the whole batch, so no
/// snapshot can observe a partially-advanced state.
///
/// # Errors
///
/// Returns the first [`TickError`] encountered; earlier days of the
/// batch remain applied (the process treats this as fatal).
pub fn advance(
    world: &mut FarmWorld,
    days: u32,
    tuning: &SimTuning,
    rng: &mut impl Rng,
    sink: &dyn EventSink,
) -> Result<Vec<DaySummary>, TickError> {
    let mut summaries = Vec::with_capacity(usize::try_from(days).unwrap_or_default());
    for _ in 0..days {
        summaries.push(advance_day(world, tuning, rng, sink)?);
    }
    Ok(summaries)
}

/// Phase 1: weighted memoryless weather draw.
fn phase_weather(world: &mut FarmWorld, rng: &mut impl Rng, sink: &dyn EventSink) {
    let next = weather::roll_weather(rng);
    if next != world.weather {
        events::emit(
            sink,
            world.total_days,
            FarmEvent::WeatherChanged {
                from: world.weather,
                to: next,
            },
        );
    }
    world.weather = next;
}

/// Phase 2: disease outbreak, progression, recovery, death.
fn phase_disease(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    rng: &mut impl Rng,
    sink: &dyn EventSink,
) -> disease::DiseaseDayOutcome {
    let day = world.total_days;
    let outcome = disease::run_daily_cycle(
        &mut world.animals,
        &mut world.diseases,
        day,
        &tuning.disease,
        rng,
    );

    if let Some(record) = &outcome.outbreak {
        events::emit(
            sink,
            day,
            FarmEvent::DiseaseOutbreak {
                disease: record.kind,
                animal: record.animal_name.clone(),
            },
        );
    }
    for recovery in &outcome.recoveries {
        events::emit(
            sink,
            day,
            FarmEvent::AnimalRecovered {
                name: recovery.animal_name.clone(),
                species: recovery.species,
                disease: recovery.disease,
            },
        );
    }
    for (animal, kind) in &outcome.deaths {
        events::emit(
            sink,
            day,
            FarmEvent::AnimalDied {
                name: animal.name.clone(),
                species: animal.species,
                cause: DeathCause::Disease(*kind),
            },
        );
    }

    outcome
}

/// Phase 3: market drift and history.
fn phase_market(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    rng: &mut impl Rng,
    sink: &dyn EventSink,
) -> Result<(), TickError> {
    let day = world.total_days;
    world.market.advance_day(day, &tuning.market, rng)?;
    events::emit(
        sink,
        day,
        FarmEvent::MarketUpdated {
            prices: world.market.prices().clone(),
        },
    );
    Ok(())
}

/// Phase 4: aging, hunger, deaths, cooldowns, and orphaned-record pruning.
fn phase_time_effects(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    rng: &mut impl Rng,
    sink: &dyn EventSink,
) -> Result<Vec<(String, DeathCause)>, TickError> {
    let day = world.total_days;
    let mut deaths = Vec::new();

    let mut idx = 0;
    while idx < world.animals.len() {
        let Some(animal) = world.animals.get_mut(idx) else {
            break;
        };
        let outcome = vitals::apply_daily_tick(animal, &tuning.herd, rng)?;
        if let Some(cause) = outcome.death {
            let dead = world.animals.remove(idx);
            events::emit(
                sink,
                day,
                FarmEvent::AnimalDied {
                    name: dead.name.clone(),
                    species: dead.species,
                    cause,
                },
            );
            deaths.push((dead.name, cause));
        } else {
            idx = idx.saturating_add(1);
        }
    }

    // Count down breeding cooldowns; spent entries disappear.
    for cooldown in world.breeding_cooldowns.values_mut() {
        *cooldown = cooldown.saturating_sub(1);
    }
    world.breeding_cooldowns.retain(|_, cooldown| *cooldown > 0);

    // A record whose host died above must not outlive the day.
    let roster: Vec<&str> = world.animals.iter().map(|a| a.name.as_str()).collect();
    let before = world.diseases.len();
    world
        .diseases
        .retain(|record| roster.contains(&record.animal_name.as_str()));
    if world.diseases.len() < before {
        debug!(
            day,
            pruned = before.saturating_sub(world.diseases.len()),
            "pruned orphaned disease records"
        );
    }

    Ok(deaths)
}

/// Phase 5: production credited to the ledger.
fn phase_production(
    world: &mut FarmWorld,
    tuning: &SimTuning,
    sink: &dyn EventSink,
) -> Result<BTreeMap<Resource, Decimal>, TickError> {
    let day = world.total_days;
    let reports = production::daily_yields(&world.animals, &tuning.production)?;

    let mut produced: BTreeMap<Resource, Decimal> = BTreeMap::new();
    for report in reports {
        world.ledger.credit(report.resource, report.amount)?;
        let total = produced.entry(report.resource).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(report.amount)
            .ok_or_else(|| SimError::overflow("production total"))?;
        events::emit(
            sink,
            day,
            FarmEvent::ResourceProduced {
                animal: report.animal_name,
                resource: report.resource,
                amount: report.amount,
            },
        );
    }

    Ok(produced)
}
