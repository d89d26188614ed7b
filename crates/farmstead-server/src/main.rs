//! Farmstead server binary.
//!
//! Wires together the seeded world, the tick scheduler, the event sink,
//! and the Axum play server. Loads configuration, initializes all
//! subsystems, and runs until the server stops or the scheduler hits a
//! fatal tick error.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `farmstead-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the starting world and the random source
//! 4. Build the shared application state
//! 5. Spawn the tick scheduler task
//! 6. Serve the play API
//!
//! A scheduler failure is fatal: the process logs it and exits rather
//! than serving a world it can no longer advance correctly.

use std::path::Path;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use farmstead_core::config::{ConfigError, FarmConfig};
use farmstead_core::events::{EventSink, TracingSink};
use farmstead_core::{scheduler, seed};
use farmstead_server::server::start_server;
use farmstead_server::state::{AppState, BroadcastObserver};
use farmstead_sim::SimTuning;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step fails, the server dies,
/// or the scheduler hits a fatal tick error.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!(
        farm = config.world.name,
        seed = config.world.seed,
        interval_secs = config.scheduler.advance_interval_secs,
        days_per_advance = config.scheduler.days_per_advance,
        "farmstead-server starting"
    );

    // 3. Seed the world and the random source.
    let world = Arc::new(RwLock::new(seed::starting_farm()));
    let rng = SmallRng::seed_from_u64(config.world.seed);
    let tuning = SimTuning::default();
    let sink: Arc<dyn EventSink> = Arc::new(TracingSink);

    // 4. Shared application state.
    let state = Arc::new(AppState::new(
        Arc::clone(&world),
        tuning.clone(),
        Arc::clone(&sink),
    ));
    info!("world seeded, application state ready");

    // 5. Spawn the scheduler with a broadcast observer.
    let observer = BroadcastObserver::new(Arc::clone(&state));
    let scheduler_handle = tokio::spawn(scheduler::run(
        world,
        tuning,
        config.scheduler.scheduler_config(),
        rng,
        sink,
        observer,
    ));
    info!("tick scheduler started");

    // 6. Serve until either side stops. The scheduler only ever returns
    //    on a fatal tick error.
    tokio::select! {
        result = scheduler_handle => {
            match result {
                Ok(Ok(())) => error!("scheduler stopped unexpectedly"),
                Ok(Err(tick_error)) => {
                    error!(%tick_error, "fatal tick error, shutting down");
                    return Err(Box::new(tick_error) as Box<dyn std::error::Error>);
                }
                Err(join_error) => {
                    error!(%join_error, "scheduler task panicked or was cancelled");
                    return Err(Box::new(join_error) as Box<dyn std::error::Error>);
                }
            }
        }
        result = start_server(&config.server, state) => {
            result.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)?;
            info!("server stopped");
        }
    }

    Ok(())
}

/// Load the configuration from `farmstead-config.yaml`, falling back to
/// defaults when the file is absent.
fn load_config() -> Result<FarmConfig, ConfigError> {
    let config_path = Path::new("farmstead-config.yaml");
    if config_path.exists() {
        FarmConfig::from_file(config_path)
    } else {
        Ok(FarmConfig::default())
    }
}
