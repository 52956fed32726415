//! # reacto-std
//!
//! Standard implementations for the Reacto reaction dispatch layer.
//!
//! This crate provides:
//! - **Logging**: [`TracingLog`](logging::TracingLog) (feature `tracing`)
//! - **Statistics**: [`InMemoryStatistics`](statistics::InMemoryStatistics)
//! - **Plugin sources**: [`StaticSource`](sources::StaticSource),
//!   [`DirectorySource`](sources::DirectorySource)
//! - **Built-in hooks**: [`ReactionHooks`](hooks::ReactionHooks) responder,
//!   deadlines for deferred results (feature `timeout`)
//! - **Testing**: recording log and failing sources

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use reacto_core;

// Modules
pub mod hooks;
#[cfg(feature = "tracing")]
pub mod logging;
pub mod sources;
pub mod statistics;
pub mod testing;
