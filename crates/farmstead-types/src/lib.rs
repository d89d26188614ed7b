//! Shared type definitions for the Farmstead simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Farmstead workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the farm dashboard.
//!
//! # Modules
//!
//! - [`enums`] -- Enumeration types (resources, species, weather, diseases)
//! - [`structs`] -- Core entity structs (animals, disease records, snapshot)
//! - [`actions`] -- Player action requests submitted over the wire
//! - [`events`] -- Notable-transition records handed to the event sink

pub mod actions;
pub mod enums;
pub mod events;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::Action;
pub use enums::{Achievement, DeathCause, DiseaseKind, Resource, Species, Weather};
pub use events::{EventRecord, FarmEvent};
pub use structs::{Animal, DiseaseRecord, WorldSnapshot};
