//! # Reaction dispatcher
//!
//! Owns the ordered handler registry and runs arbitration over it.
//!
//! # Loading
//!
//! [`ReactionDispatcher::load`] asks a [`PluginSource`] for candidates,
//! validates each one, appends the built-in hook responder and publishes the
//! new list in a single store. A dispatch running concurrently sees either
//! the old list or the new one, never a partial list. A failed source leaves
//! only the hook responder; handlers from the previous load are not kept.
//!
//! # Arbitration
//!
//! Handlers are tried in registration order and the first claim wins:
//!
//! | Outcome | Claims | Logged |
//! |---|---|---|
//! | `Accepted` | yes | success record |
//! | `Declined` | no | nothing |
//! | `Deferred` | yes, immediately | success or fault once it settles |
//! | `Failed` / panic | yes | fault record |
//! | `Malformed` | no | warning |
//!
//! Nothing escapes [`ReactionDispatcher::dispatch`]; faults end in the log.

mod builder;
mod fault;

pub use builder::DispatcherBuilder;

use crate::config::DispatcherConfig;
use arc_swap::ArcSwap;
use fault::{panic_fault, report_fault};
use futures::FutureExt;
use reacto_core::{
    EventSummary, HandlerFault, MessageContext, Outcome, Pending, PluginSource, ReactionEvent,
    ReactionHandler, ReactionLog, UsageStatistics,
};
use reacto_std::hooks::{ReactionHooks, with_deadline};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};
use tokio::runtime::Handle;

/// Subsystem label of dispatch records.
pub const DISPATCH_SUBSYSTEM: &str = "REACTION";

/// Subsystem label of load records.
pub const LOAD_SUBSYSTEM: &str = "REACTION MANAGER";

/// Description logged when the plugin source cannot be listed.
pub const GENERIC_LOADING_ERROR: &str = "There was an error loading reaction handlers.";

/// Summary of one load pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Plugin handlers loaded, not counting the hook responder.
    pub loaded: usize,
    /// Candidates rejected.
    pub rejected: usize,
    /// Whether the source itself failed.
    pub source_failed: bool,
}

/// Offers reaction events to registered handlers until one claims them.
pub struct ReactionDispatcher<M: MessageContext> {
    handlers: ArcSwap<Vec<ReactionHandler<M>>>,
    hooks: ReactionHooks<M>,
    log: Arc<dyn ReactionLog>,
    statistics: Arc<dyn UsageStatistics>,
    config: DispatcherConfig,
    load_lock: tokio::sync::Mutex<()>,
}

impl<M: MessageContext> ReactionDispatcher<M> {
    /// Start building a dispatcher.
    pub fn builder() -> DispatcherBuilder<M> {
        DispatcherBuilder::new()
    }

    /// Create a dispatcher with default collaborators.
    pub fn new(config: DispatcherConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// The configuration in use.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The registry backing the hook responder.
    pub fn hooks(&self) -> &ReactionHooks<M> {
        &self.hooks
    }

    /// Names of the active handlers, in the order they are tried.
    pub fn handlers(&self) -> Vec<String> {
        self.handlers
            .load()
            .iter()
            .map(|handler| handler.name().to_owned())
            .collect()
    }

    /// Replace the handler registry with the definitions listed by `source`.
    ///
    /// Failures are logged, never returned. Concurrent loads are serialized.
    pub async fn load<S>(&self, source: &S) -> LoadReport
    where
        S: PluginSource<M>,
    {
        let _writer = self.load_lock.lock().await;
        let mut report = LoadReport::default();
        let mut built = Vec::new();

        match source.list(&self.config.plugin_location).await {
            Ok(candidates) => {
                for candidate in candidates {
                    match candidate.and_then(ReactionHandler::try_from) {
                        Ok(handler) => {
                            built.push(handler);
                            report.loaded += 1;
                        }
                        Err(err) => {
                            self.log.handler_load_failed(LOAD_SUBSYSTEM, &err.origin, &err);
                            report.rejected += 1;
                        }
                    }
                }
            }
            Err(err) => {
                self.log.load_failed(LOAD_SUBSYSTEM, GENERIC_LOADING_ERROR, &err);
                report.source_failed = true;
            }
        }

        match ReactionHandler::try_from(self.hooks.definition()) {
            Ok(responder) => built.push(responder),
            Err(err) => self.log.handler_load_failed(LOAD_SUBSYSTEM, &err.origin, &err),
        }

        tracing::debug!(
            subsystem = LOAD_SUBSYSTEM,
            location = %self.config.plugin_location.display(),
            loaded = report.loaded,
            rejected = report.rejected,
            source_failed = report.source_failed,
            "Publishing reaction handler registry"
        );
        self.handlers.store(Arc::new(built));
        report
    }

    /// Offer `event` to the handlers in order.
    ///
    /// Returns `true` when a handler claimed the event, in which case one use
    /// of that handler is counted for the reacting user.
    pub fn dispatch(&self, event: &ReactionEvent<M>) -> bool {
        match self.arbitrate(event) {
            Some(handler) => {
                self.statistics.increment(&handler, &event.user_id);
                true
            }
            None => false,
        }
    }

    fn arbitrate(&self, event: &ReactionEvent<M>) -> Option<Arc<str>> {
        let handlers = self.handlers.load_full();

        for handler in handlers.iter() {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(event))) {
                Ok(outcome) => outcome,
                Err(payload) => {
                    let fault = panic_fault(handler.name(), payload);
                    report_fault(self.log.as_ref(), DISPATCH_SUBSYSTEM, &event.summary(), fault);
                    return Some(handler.shared_name());
                }
            };

            match outcome {
                Outcome::Accepted => {
                    self.log.reaction_handled(
                        DISPATCH_SUBSYSTEM,
                        &event.summary(),
                        handler.name(),
                        true,
                    );
                }
                Outcome::Declined => continue,
                Outcome::Deferred(pending) => {
                    self.settle_detached(handler.shared_name(), event.summary(), pending);
                }
                Outcome::Failed(err) => {
                    report_fault(self.log.as_ref(), DISPATCH_SUBSYSTEM, &event.summary(), err);
                }
                Outcome::Malformed(description) => {
                    self.log
                        .malformed_result(DISPATCH_SUBSYSTEM, handler.name(), &description);
                    continue;
                }
            }
            return Some(handler.shared_name());
        }

        None
    }

    /// Resolve a deferred result on its own task; the caller does not wait.
    fn settle_detached(&self, handler: Arc<str>, event: EventSummary, pending: Pending) {
        let pending = match self.config.deferred_deadline() {
            Some(deadline) => with_deadline(pending, handler.as_ref(), deadline),
            None => pending,
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                let fault = HandlerFault::NoRuntime(handler.to_string()).into();
                report_fault(self.log.as_ref(), DISPATCH_SUBSYSTEM, &event, fault);
                return;
            }
        };

        let log = Arc::clone(&self.log);
        runtime.spawn(async move {
            match AssertUnwindSafe(pending).catch_unwind().await {
                Ok(Ok(())) => log.reaction_handled(DISPATCH_SUBSYSTEM, &event, &handler, true),
                Ok(Err(err)) => report_fault(log.as_ref(), DISPATCH_SUBSYSTEM, &event, err),
                Err(payload) => {
                    let fault = panic_fault(&handler, payload);
                    report_fault(log.as_ref(), DISPATCH_SUBSYSTEM, &event, fault);
                }
            }
        });
    }
}
