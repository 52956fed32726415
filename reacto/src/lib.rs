//! # reacto - Pluggable Reaction Dispatch
//!
//! `reacto` offers chat reaction events (an emoji applied by a user to a
//! message) to a registered set of handler plugins, in order, until one of
//! them claims the event.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reacto::prelude::*;
//!
//! let source = StaticSource::new()
//!     .with(HandlerDefinition::new("star", |msg: &MessageRef, emoji: &Emoji, _: &UserId| {
//!         emoji.as_str() == "⭐"
//!     }));
//!
//! let dispatcher = ReactionDispatcher::new(DispatcherConfig::default());
//! dispatcher.load(&source).await;
//!
//! let handled = dispatcher.dispatch(&ReactionEvent::new(
//!     MessageRef::new("m1", "general"),
//!     "⭐",
//!     "user-1",
//! ));
//! ```
//!
//! Handlers that need to do async work return [`Outcome::deferred`]; the
//! dispatcher claims the event right away and reports the result when the
//! work settles.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod config;
pub mod dispatcher;

pub use config::{ConfigError, DispatcherConfig};
pub use dispatcher::{
    DISPATCH_SUBSYSTEM, DispatcherBuilder, GENERIC_LOADING_ERROR, LOAD_SUBSYSTEM, LoadReport,
    ReactionDispatcher,
};

pub use reacto_core::{
    // Handlers
    Action,
    // Errors
    BoxError,
    Candidate,
    DefinitionProblem,
    // Event
    Emoji,
    EventSummary,
    Field,
    HandlerDefinition,
    HandlerFault,
    // Outcome
    IntoOutcome,
    IntoResolution,
    InvalidDefinition,
    LoadError,
    MessageContext,
    MessageRef,
    NoopLog,
    NoopStatistics,
    Outcome,
    Pending,
    // Collaborators
    PluginSource,
    PublicError,
    ReactionEvent,
    ReactionHandler,
    ReactionLog,
    SharedAction,
    UsageStatistics,
    UserId,
};

/// Built-in hook responder and result wrappers.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use reacto_std::hooks::*;
}

/// Plugin sources.
pub mod sources {
    #![allow(clippy::wildcard_imports)]
    pub use reacto_std::sources::*;
}

/// Log implementations.
pub mod logging {
    #![allow(clippy::wildcard_imports)]
    pub use reacto_std::logging::*;
}

/// Statistics implementations.
pub mod statistics {
    #![allow(clippy::wildcard_imports)]
    pub use reacto_std::statistics::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use reacto_std::testing::*;
}

/// Prelude module - common imports for Reacto.
///
/// # Usage
///
/// ```rust,ignore
/// use reacto::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DispatcherConfig, Emoji, HandlerDefinition, IntoOutcome, MessageContext, MessageRef,
        Outcome, PluginSource, ReactionDispatcher, ReactionEvent, ReactionHandler, UserId,
        hooks::ReactionHooks,
        sources::{ActionCatalog, DirectorySource, StaticSource},
    };
}
