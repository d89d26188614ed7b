//! World state, tick pipeline, and action processing for the Farmstead
//! simulation.
//!
//! This crate owns the canonical farm: the [`world::FarmWorld`] holding
//! every entity, the five-phase daily pipeline in [`tick`], the player
//! command handlers in [`actions`], and the [`scheduler`] that advances
//! the shared world on a wall-clock cadence.
//!
//! # Mutation discipline
//!
//! Only two paths mutate the world: [`tick::advance`] (driven by the
//! scheduler) and [`actions::apply`] (driven by the transport). Both run
//! under the caller's exclusive lock; snapshots are taken with
//! [`world::FarmWorld::snapshot`] and published only after the lock is
//! released.

pub mod achievements;
pub mod actions;
pub mod config;
pub mod events;
pub mod scheduler;
pub mod seed;
pub mod tick;
pub mod world;

pub use actions::{ActionError, ActionReceipt};
pub use config::FarmConfig;
pub use events::{EventSink, NoOpSink, TracingSink};
pub use tick::{DaySummary, TickError};
pub use world::FarmWorld;
