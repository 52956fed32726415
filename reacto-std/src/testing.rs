//! Testing utilities for Reacto.
//!
//! This module provides collaborators that make dispatcher behavior easy to
//! assert on.
//!
//! # Features
//!
//! - [`RecordingLog`]: A log that records every record it receives
//! - [`UnavailableSource`]: A plugin source that always fails to list
//! - [`CountingAction`]: An action that counts invocations and returns a fixed verdict

use reacto_core::{
    Candidate, Emoji, EventSummary, InvalidDefinition, LoadError, MessageContext, Outcome,
    PluginSource, PublicError, ReactionLog, UserId,
};
use std::{
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::Notify;

// ============================================================================
// Recording Log
// ============================================================================

/// One record received by a [`RecordingLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// The plugin source failed.
    LoadFailed {
        /// Subsystem label.
        subsystem: String,
        /// Description.
        description: String,
        /// Cause, rendered.
        cause: String,
    },
    /// One candidate was rejected.
    HandlerLoadFailed {
        /// Subsystem label.
        subsystem: String,
        /// Origin of the candidate.
        origin: String,
        /// Cause, rendered.
        cause: String,
    },
    /// A handler processed an event.
    Handled {
        /// Subsystem label.
        subsystem: String,
        /// Event identity.
        event: EventSummary,
        /// Handler name.
        handler: String,
        /// Accepted flag.
        accepted: bool,
    },
    /// A handler returned an invalid value.
    Malformed {
        /// Subsystem label.
        subsystem: String,
        /// Handler name.
        handler: String,
        /// Description of the value.
        description: String,
    },
    /// A handler faulted.
    Fault {
        /// Subsystem label.
        subsystem: String,
        /// Event identity.
        event: EventSummary,
        /// Log description of the normalized error.
        description: String,
        /// Public message of the normalized error.
        public_message: String,
        /// Public-facing flag.
        public: bool,
    },
}

/// A log that records everything it receives.
///
/// # Example
///
/// ```rust,ignore
/// let log = RecordingLog::new();
/// let dispatcher = ReactionDispatcher::builder().log(log.clone()).build();
///
/// dispatcher.dispatch(event);
/// assert_eq!(log.faults().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingLog {
    records: Arc<Mutex<Vec<LogRecord>>>,
    changed: Arc<Notify>,
}

impl RecordingLog {
    /// Create an empty recording log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of all records.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }

    /// Fault records only.
    pub fn faults(&self) -> Vec<LogRecord> {
        self.filtered(|r| matches!(r, LogRecord::Fault { .. }))
    }

    /// Handled records only.
    pub fn handled(&self) -> Vec<LogRecord> {
        self.filtered(|r| matches!(r, LogRecord::Handled { .. }))
    }

    /// Malformed-result records only.
    pub fn malformed(&self) -> Vec<LogRecord> {
        self.filtered(|r| matches!(r, LogRecord::Malformed { .. }))
    }

    /// Load failure records, both source-level and per-candidate.
    pub fn load_failures(&self) -> Vec<LogRecord> {
        self.filtered(|r| {
            matches!(
                r,
                LogRecord::LoadFailed { .. } | LogRecord::HandlerLoadFailed { .. }
            )
        })
    }

    /// Clear all records.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }

    /// Wait until `predicate` holds for the records, or `timeout` elapses.
    ///
    /// Returns whether the predicate held. Requires the `timeout` feature.
    #[cfg(feature = "timeout")]
    pub async fn wait_for<P>(&self, predicate: P, timeout: std::time::Duration) -> bool
    where
        P: Fn(&[LogRecord]) -> bool,
    {
        let wait = async {
            loop {
                let notified = self.changed.notified();
                if predicate(&self.records.lock().unwrap()) {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.is_ok()
    }

    fn filtered(&self, keep: impl Fn(&LogRecord) -> bool) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect()
    }

    fn push(&self, record: LogRecord) {
        self.records.lock().unwrap().push(record);
        self.changed.notify_waiters();
    }
}

impl ReactionLog for RecordingLog {
    fn load_failed(&self, subsystem: &str, description: &str, cause: &(dyn std::error::Error + 'static)) {
        self.push(LogRecord::LoadFailed {
            subsystem: subsystem.to_owned(),
            description: description.to_owned(),
            cause: cause.to_string(),
        });
    }

    fn handler_load_failed(&self, subsystem: &str, origin: &str, cause: &InvalidDefinition) {
        self.push(LogRecord::HandlerLoadFailed {
            subsystem: subsystem.to_owned(),
            origin: origin.to_owned(),
            cause: cause.problem.to_string(),
        });
    }

    fn reaction_handled(&self, subsystem: &str, event: &EventSummary, handler: &str, accepted: bool) {
        self.push(LogRecord::Handled {
            subsystem: subsystem.to_owned(),
            event: event.clone(),
            handler: handler.to_owned(),
            accepted,
        });
    }

    fn malformed_result(&self, subsystem: &str, handler: &str, description: &str) {
        self.push(LogRecord::Malformed {
            subsystem: subsystem.to_owned(),
            handler: handler.to_owned(),
            description: description.to_owned(),
        });
    }

    fn fault(&self, subsystem: &str, event: &EventSummary, error: &PublicError, public: bool) {
        self.push(LogRecord::Fault {
            subsystem: subsystem.to_owned(),
            event: event.clone(),
            description: error.log_description().to_owned(),
            public_message: error.public_message().to_owned(),
            public,
        });
    }
}

// ============================================================================
// Unavailable Source
// ============================================================================

/// A plugin source whose location can never be listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSource;

impl<M: MessageContext> PluginSource<M> for UnavailableSource {
    async fn list(&self, location: &Path) -> Result<Vec<Candidate<M>>, LoadError> {
        Err(LoadError::SourceUnavailable {
            location: location.display().to_string(),
            source: "source is unreachable".into(),
        })
    }
}

// ============================================================================
// Counting Action
// ============================================================================

/// An action that counts invocations and returns a fixed verdict.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingAction::declining();
/// let definition = counter.definition::<MessageRef>("never");
///
/// dispatcher.dispatch(event);
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CountingAction {
    count: Arc<AtomicUsize>,
    accept: bool,
}

impl CountingAction {
    /// A counter that accepts every event.
    pub fn accepting() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            accept: true,
        }
    }

    /// A counter that declines every event.
    pub fn declining() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            accept: false,
        }
    }

    /// Number of invocations so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// A handler definition backed by this counter.
    pub fn definition<M: MessageContext>(&self, name: &str) -> reacto_core::HandlerDefinition<M> {
        let counter = self.clone();
        reacto_core::HandlerDefinition::new(name, move |_: &M, _: &Emoji, _: &UserId| {
            counter.count.fetch_add(1, Ordering::SeqCst);
            if counter.accept {
                Outcome::Accepted
            } else {
                Outcome::Declined
            }
        })
    }
}
