//! Shared application state for the play server.
//!
//! [`AppState`] bundles the world lock, the rules tuning, the event
//! sink, and the broadcast channel that fans snapshots out to connected
//! clients. It is wrapped in [`Arc`] and injected via Axum's `State`
//! extractor.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use farmstead_core::events::EventSink;
use farmstead_core::scheduler::AdvanceObserver;
use farmstead_core::tick::DaySummary;
use farmstead_core::world::FarmWorld;
use farmstead_core::{ActionError, ActionReceipt, actions};
use farmstead_sim::SimTuning;
use farmstead_types::{Action, WorldSnapshot};

/// Capacity of the snapshot broadcast channel.
///
/// A subscriber that falls more than this many snapshots behind
/// receives a lag notice and resumes from the newest one.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// The canonical world, shared with the scheduler task.
    pub world: Arc<RwLock<FarmWorld>>,
    /// Rules tuning used when applying actions.
    pub tuning: SimTuning,
    /// Sink receiving notable-transition events from actions.
    pub sink: Arc<dyn EventSink>,
    /// Broadcast sender for world snapshots.
    tx: broadcast::Sender<WorldSnapshot>,
}

impl AppState {
    /// Create the application state around an existing world handle.
    pub fn new(world: Arc<RwLock<FarmWorld>>, tuning: SimTuning, sink: Arc<dyn EventSink>) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            world,
            tuning,
            sink,
            tx,
        }
    }

    /// Subscribe to the snapshot stream.
    ///
    /// Dropping the receiver is the unsubscribe; the channel forgets
    /// the subscriber on its own.
    pub fn subscribe(&self) -> broadcast::Receiver<WorldSnapshot> {
        self.tx.subscribe()
    }

    /// Publish a snapshot to every subscriber.
    ///
    /// Returns the number of receivers reached; 0 when no client is
    /// connected, which is not an error.
    pub fn broadcast(&self, snapshot: WorldSnapshot) -> usize {
        // send fails only when there are zero receivers.
        self.tx.send(snapshot).unwrap_or(0)
    }

    /// Read a fresh snapshot of the world.
    pub async fn snapshot(&self) -> WorldSnapshot {
        self.world.read().await.snapshot()
    }

    /// Apply one action under the write lock and capture the resulting
    /// snapshot before releasing it.
    ///
    /// The snapshot is returned alongside the result so the caller can
    /// reply and broadcast without re-locking; on failure it is simply
    /// the unchanged state.
    pub async fn apply_action(
        &self,
        action: &Action,
    ) -> (Result<ActionReceipt, ActionError>, WorldSnapshot) {
        let mut guard = self.world.write().await;
        let result = actions::apply(&mut guard, &self.tuning, action, self.sink.as_ref());
        let snapshot = guard.snapshot();
        drop(guard);
        (result, snapshot)
    }
}

/// Scheduler observer that publishes each post-batch snapshot to the
/// broadcast channel.
pub struct BroadcastObserver {
    /// Shared application state carrying the channel.
    state: Arc<AppState>,
}

impl BroadcastObserver {
    /// Create an observer publishing through the given state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl AdvanceObserver for BroadcastObserver {
    fn on_advanced(&mut self, snapshot: &WorldSnapshot, _summaries: &[DaySummary]) {
        let reached = self.state.broadcast(snapshot.clone());
        tracing::debug!(day = snapshot.total_days, reached, "snapshot broadcast");
    }
}
