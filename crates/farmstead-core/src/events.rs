//! Best-effort recording of notable transitions.
//!
//! The simulation narrates itself through an [`EventSink`]: the tick
//! pipeline and the action processor hand every notable transition to
//! the sink and move on. The sink is a capability -- the core never
//! branches on which implementation is installed, and a sink that does
//! nothing ([`NoOpSink`]) is always valid.
//!
//! Recording is infallible by signature. An implementation that talks to
//! an external collector must swallow its own failures; nothing in the
//! simulation may depend on delivery.

use farmstead_types::{EventRecord, FarmEvent};
use tracing::info;

/// A recipient for notable-transition records.
pub trait EventSink: Send + Sync {
    /// Record one event. Must not fail and must not block on I/O.
    fn record(&self, record: &EventRecord);
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn record(&self, _record: &EventRecord) {}
}

/// A sink that emits each event as a structured log line.
///
/// Serialization failures are silently discarded; an event that cannot
/// be encoded is simply not logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, record: &EventRecord) {
        if let Ok(payload) = serde_json::to_string(record) {
            info!(target: "farmstead::events", day = record.day, %payload, "farm event");
        }
    }
}

/// Convenience for emitting an event through a sink with the envelope
/// stamped in one step.
pub fn emit(sink: &dyn EventSink, day: u64, event: FarmEvent) {
    sink.record(&EventRecord::new(day, event));
}
