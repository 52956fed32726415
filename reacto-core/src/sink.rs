//! Logging and statistics collaborators.
//!
//! The dispatcher reports everything it does through a [`ReactionLog`] and
//! counts claimed events through [`UsageStatistics`]. Both are append-only
//! services from the dispatcher's point of view.

use crate::{
    error::{InvalidDefinition, PublicError},
    event::{EventSummary, UserId},
};

/// Receiver of the dispatcher's log records.
///
/// Every record carries the subsystem label of the part of the dispatcher
/// that emitted it.
pub trait ReactionLog: Send + Sync + 'static {
    /// The plugin source could not be enumerated.
    fn load_failed(&self, subsystem: &str, description: &str, cause: &(dyn std::error::Error + 'static));

    /// A single candidate definition was rejected.
    fn handler_load_failed(&self, subsystem: &str, origin: &str, cause: &InvalidDefinition);

    /// A handler claimed and processed an event.
    fn reaction_handled(&self, subsystem: &str, event: &EventSummary, handler: &str, accepted: bool);

    /// A handler returned something that is not a verdict.
    fn malformed_result(&self, subsystem: &str, handler: &str, description: &str);

    /// A handler faulted.
    fn fault(&self, subsystem: &str, event: &EventSummary, error: &PublicError, public: bool);
}

/// Receiver of per-handler usage counts.
pub trait UsageStatistics: Send + Sync + 'static {
    /// Count one event claimed by `handler` on behalf of `user_id`.
    fn increment(&self, handler: &str, user_id: &UserId);
}

/// A log that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl ReactionLog for NoopLog {
    fn load_failed(&self, _: &str, _: &str, _: &(dyn std::error::Error + 'static)) {}
    fn handler_load_failed(&self, _: &str, _: &str, _: &InvalidDefinition) {}
    fn reaction_handled(&self, _: &str, _: &EventSummary, _: &str, _: bool) {}
    fn malformed_result(&self, _: &str, _: &str, _: &str) {}
    fn fault(&self, _: &str, _: &EventSummary, _: &PublicError, _: bool) {}
}

/// Statistics that are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStatistics;

impl UsageStatistics for NoopStatistics {
    fn increment(&self, _: &str, _: &UserId) {}
}
