//! Builder for [`ReactionDispatcher`].

use super::ReactionDispatcher;
use crate::config::DispatcherConfig;
use arc_swap::ArcSwap;
use reacto_core::{MessageContext, ReactionLog, UsageStatistics};
use reacto_std::{hooks::ReactionHooks, logging::TracingLog, statistics::InMemoryStatistics};
use std::sync::Arc;

/// Builder for constructing a [`ReactionDispatcher`].
///
/// Defaults: [`DispatcherConfig::default`], [`TracingLog`],
/// [`InMemoryStatistics`] and an empty [`ReactionHooks`] registry.
pub struct DispatcherBuilder<M: MessageContext> {
    config: DispatcherConfig,
    log: Option<Arc<dyn ReactionLog>>,
    statistics: Option<Arc<dyn UsageStatistics>>,
    hooks: Option<ReactionHooks<M>>,
}

impl<M: MessageContext> Default for DispatcherBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MessageContext> DispatcherBuilder<M> {
    /// Create a builder with default collaborators.
    pub fn new() -> Self {
        Self {
            config: DispatcherConfig::default(),
            log: None,
            statistics: None,
            hooks: None,
        }
    }

    /// Use `config`.
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Send log records to `log`.
    pub fn log<L: ReactionLog>(self, log: L) -> Self {
        self.shared_log(Arc::new(log))
    }

    /// Send log records to an already shared log.
    pub fn shared_log(mut self, log: Arc<dyn ReactionLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Count claimed events in `statistics`.
    pub fn statistics<S: UsageStatistics>(self, statistics: S) -> Self {
        self.shared_statistics(Arc::new(statistics))
    }

    /// Count claimed events in already shared statistics.
    pub fn shared_statistics(mut self, statistics: Arc<dyn UsageStatistics>) -> Self {
        self.statistics = Some(statistics);
        self
    }

    /// Back the hook responder with `hooks`.
    pub fn hooks(mut self, hooks: ReactionHooks<M>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Build the dispatcher. It has no handlers until the first load.
    pub fn build(self) -> ReactionDispatcher<M> {
        ReactionDispatcher {
            handlers: ArcSwap::from_pointee(Vec::new()),
            hooks: self.hooks.unwrap_or_default(),
            log: self.log.unwrap_or_else(|| Arc::new(TracingLog)),
            statistics: self
                .statistics
                .unwrap_or_else(|| Arc::new(InMemoryStatistics::new())),
            config: self.config,
            load_lock: tokio::sync::Mutex::new(()),
        }
    }
}
