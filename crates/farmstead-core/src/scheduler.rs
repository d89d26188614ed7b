//! The tick scheduler: advancing the shared world on a wall-clock cadence.
//!
//! The scheduler is a two-state machine. It sits **Idle** until the next
//! interval boundary, then switches to **Advancing**: it takes the
//! world's write lock, applies the configured batch of days atomically,
//! captures a snapshot, releases the lock, and hands the snapshot to the
//! observer (which broadcasts it to subscribers). Then back to Idle.
//!
//! A tick error is fatal: the loop returns it and the process decides
//! to halt, because continuing past a half-advanced day risks silently
//! wrong simulation results.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use farmstead_sim::SimTuning;
use farmstead_types::WorldSnapshot;

use crate::events::EventSink;
use crate::tick::{self, DaySummary, TickError};
use crate::world::FarmWorld;

/// Cadence configuration for the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Wall-clock time between advances.
    pub advance_interval: Duration,
    /// Days applied per advance, as one atomic batch.
    pub days_per_advance: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            advance_interval: Duration::from_secs(10),
            days_per_advance: 3,
        }
    }
}

/// The scheduler's two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// Waiting for the next interval boundary.
    Idle,
    /// Applying a batch of days under the write lock.
    Advancing,
}

/// Callback invoked after each batch completes.
///
/// Implementations publish the snapshot to subscribers. The snapshot is
/// captured before the lock is released and handed over after, so the
/// observer never runs inside the critical section.
pub trait AdvanceObserver: Send {
    /// Called with the post-batch snapshot and the batch's summaries.
    fn on_advanced(&mut self, snapshot: &WorldSnapshot, summaries: &[DaySummary]);
}

/// An observer that ignores every advance (tests, headless runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl AdvanceObserver for NoOpObserver {
    fn on_advanced(&mut self, _snapshot: &WorldSnapshot, _summaries: &[DaySummary]) {}
}

/// Run the scheduler until a tick fails.
///
/// The first interval boundary fires one full `advance_interval` after
/// entry; the world's seeded state is the one clients see until then.
///
/// # Errors
///
/// Returns the [`TickError`] that stopped the loop. There is no other
/// way out; callers treat a return as fatal.
pub async fn run(
    world: Arc<RwLock<FarmWorld>>,
    tuning: SimTuning,
    config: SchedulerConfig,
    mut rng: impl Rng + Send,
    sink: Arc<dyn EventSink>,
    mut observer: impl AdvanceObserver,
) -> Result<(), TickError> {
    info!(
        interval_secs = config.advance_interval.as_secs(),
        days_per_advance = config.days_per_advance,
        "scheduler starting"
    );

    let mut interval = tokio::time::interval(config.advance_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately; consume
    // it so the opening state survives for one full interval.
    interval.tick().await;

    loop {
        // Idle: wait out the boundary.
        interval.tick().await;

        debug!(
            phase = ?SchedulerPhase::Advancing,
            days = config.days_per_advance,
            "tick boundary reached"
        );

        let (snapshot, summaries) = {
            let mut guard = world.write().await;
            let summaries = tick::advance(
                &mut guard,
                config.days_per_advance,
                &tuning,
                &mut rng,
                sink.as_ref(),
            )?;
            (guard.snapshot(), summaries)
        };

        // Publish outside the critical section: mutate-then-publish.
        observer.on_advanced(&snapshot, &summaries);

        debug!(
            phase = ?SchedulerPhase::Idle,
            day = snapshot.total_days,
            "batch complete"
        );
    }
}
