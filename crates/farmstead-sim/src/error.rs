//! Error types for the rules engine.
//!
//! All operations that can fail return typed errors rather than panicking.
//! The only failure the daily rules can hit is arithmetic leaving its
//! domain; that is treated as state corruption and surfaced upward, never
//! papered over.

/// Errors that can occur while applying daily transition rules.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An arithmetic operation overflowed or left its valid domain.
    #[error("arithmetic overflow in simulation rule: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

impl SimError {
    /// Shorthand for an overflow error with a static context description.
    pub fn overflow(context: &str) -> Self {
        Self::ArithmeticOverflow {
            context: context.to_owned(),
        }
    }
}
