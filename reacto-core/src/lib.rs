//! # reacto-core
//!
//! Core types for the Reacto reaction dispatch layer.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! plugins that only need to define handlers.
//!
//! # Model
//!
//! - A [`ReactionEvent`] is a user applying an [`Emoji`] to a message.
//! - A [`ReactionHandler`] wraps a plugin's name and [`Action`]. Its
//!   [`handle`](ReactionHandler::handle) call returns an [`Outcome`].
//! - An [`Outcome`] either claims the event (`Accepted`, `Deferred`,
//!   `Failed`) or lets the next handler try (`Declined`, `Malformed`).
//! - A [`PluginSource`] lists raw [`HandlerDefinition`]s, validated into
//!   handlers at load time.
//! - [`ReactionLog`] and [`UsageStatistics`] receive what the dispatcher did.
//!
//! # Error Types
//!
//! - [`InvalidDefinition`] - Load-time validation errors
//! - [`LoadError`] - Plugin source errors
//! - [`HandlerFault`] - Handler execution faults
//! - [`PublicError`] - Normalized, user-safe faults

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod handler;
mod outcome;
mod sink;
mod source;

// Re-exports
pub use error::{
    BoxError, DefinitionProblem, HandlerFault, InvalidDefinition, LoadError, PublicError,
};
pub use event::{Emoji, EventSummary, MessageContext, MessageRef, ReactionEvent, UserId};
pub use handler::{Action, Field, HandlerDefinition, ReactionHandler, SharedAction};
pub use outcome::{IntoOutcome, IntoResolution, Outcome, Pending};
pub use sink::{NoopLog, NoopStatistics, ReactionLog, UsageStatistics};
pub use source::{Candidate, PluginSource};
