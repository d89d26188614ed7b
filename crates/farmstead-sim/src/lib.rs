//! Daily transition rules for the Farmstead simulation.
//!
//! This crate is the rules engine: the stochastic functions that carry the
//! farm from one day to the next. Each module covers one phase of the daily
//! pipeline; the tick orchestration that strings them together lives in
//! `farmstead-core`.
//!
//! # Design Principles
//!
//! - Every random draw goes through a caller-supplied [`rand::Rng`], so a
//!   seeded generator reproduces a whole run exactly.
//! - Quantities and prices are [`rust_decimal::Decimal`] with checked
//!   arithmetic; vitals are `u32` with saturating/checked arithmetic.
//! - Functions mutate the narrow slice of state they own and report what
//!   happened through small outcome structs; they never record events or
//!   touch the ledger themselves.

pub mod config;
pub mod disease;
pub mod error;
pub mod market;
pub mod production;
pub mod vitals;
pub mod weather;

pub use config::SimTuning;
pub use error::SimError;
pub use market::Market;
