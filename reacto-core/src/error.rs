//! Error types for Reacto.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`InvalidDefinition`] - A handler definition failed validation at load time
//! - [`LoadError`] - A plugin source could not enumerate its candidates
//! - [`HandlerFault`] - A handler failed while processing an event
//! - [`PublicError`] - An error carrying a message that is safe to surface

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A handler definition that could not be turned into a handler.
#[derive(Error, Debug)]
#[error("definition `{origin}` rejected: {problem}")]
pub struct InvalidDefinition {
    /// File or definition identity the candidate came from.
    pub origin: String,
    /// What was wrong with it.
    #[source]
    pub problem: DefinitionProblem,
}

impl InvalidDefinition {
    /// Create a new rejection for the given origin.
    pub fn new(origin: impl Into<String>, problem: DefinitionProblem) -> Self {
        Self {
            origin: origin.into(),
            problem,
        }
    }
}

/// The reason a handler definition was rejected.
#[derive(Error, Debug)]
pub enum DefinitionProblem {
    /// No name was given.
    #[error("handler does not have a name")]
    MissingName,

    /// The name is an empty string.
    #[error("handler name is empty")]
    EmptyName,

    /// The name is present but not a string.
    #[error("handler name is not a string (found {0})")]
    NameNotString(&'static str),

    /// No action was given.
    #[error("handler does not have an action")]
    MissingAction,

    /// The action is present but cannot be invoked.
    #[error("handler action is not callable (found {0})")]
    ActionNotCallable(&'static str),

    /// The action refers to something the source cannot resolve.
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    /// The definition could not be read at all.
    #[error("definition could not be read: {0}")]
    Unreadable(#[source] BoxError),
}

/// Errors raised by a plugin source while enumerating candidates.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The location could not be listed.
    #[error("plugin source unavailable at {location}: {source}")]
    SourceUnavailable {
        /// The location that was asked for.
        location: String,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },
}

/// Faults raised while a handler processes an event.
#[derive(Error, Debug)]
pub enum HandlerFault {
    /// The handler panicked.
    #[error("handler `{handler}` panicked: {message}")]
    Panicked {
        /// Name of the handler.
        handler: String,
        /// Panic payload, when it was a string.
        message: String,
    },

    /// A deferred result did not settle in time.
    #[error("handler `{handler}` did not settle within {deadline:?}")]
    DeadlineElapsed {
        /// Name of the handler.
        handler: String,
        /// The configured deadline.
        deadline: Duration,
    },

    /// A deadline was configured but the async runtime has no timer.
    #[error("handler `{handler}` has a deadline but the async runtime has timers disabled")]
    TimerUnavailable {
        /// Name of the handler.
        handler: String,
    },

    /// A deferred result was returned outside of an async runtime.
    #[error("handler `{0}` deferred its result but no async runtime is available")]
    NoRuntime(String),
}

/// An error with a message that is safe to show outside of internal logs.
///
/// Every fault reaching the shared fault handler is normalized into one of
/// these. The `Display` output is the log description; the public message is
/// kept separately.
#[derive(Error, Debug)]
#[error("{log_description}")]
pub struct PublicError {
    public_message: String,
    log_description: String,
    #[source]
    internal: Option<BoxError>,
}

impl PublicError {
    /// The public message used when a handler does not provide one.
    pub const GENERIC_MESSAGE: &'static str =
        "Oh no, that didn't work. The error has been logged and will be looked at.";

    /// Create an error with an explicit public message.
    pub fn new(public_message: impl Into<String>, log_description: impl Into<String>) -> Self {
        Self {
            public_message: public_message.into(),
            log_description: log_description.into(),
            internal: None,
        }
    }

    /// Create an error with the generic public message.
    pub fn with_generic_message(log_description: impl Into<String>, internal: Option<BoxError>) -> Self {
        Self {
            public_message: Self::GENERIC_MESSAGE.to_owned(),
            log_description: log_description.into(),
            internal,
        }
    }

    /// Normalize any error into a `PublicError`.
    ///
    /// Errors that already are a `PublicError` are unwrapped as is.
    pub fn normalize(err: BoxError) -> Self {
        match err.downcast::<PublicError>() {
            Ok(public) => *public,
            Err(other) => {
                let description = other.to_string();
                Self::with_generic_message(description, Some(other))
            }
        }
    }

    /// The message safe to show to users.
    pub fn public_message(&self) -> &str {
        &self.public_message
    }

    /// The description intended for logs.
    pub fn log_description(&self) -> &str {
        &self.log_description
    }

    /// The internal cause, if any.
    pub fn internal(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.internal.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_public_errors() {
        let err: BoxError = Box::new(PublicError::new("try later", "db down"));
        let public = PublicError::normalize(err);
        assert_eq!(public.public_message(), "try later");
        assert_eq!(public.log_description(), "db down");
    }

    #[test]
    fn normalize_wraps_other_errors() {
        let err: BoxError = "boom".into();
        let public = PublicError::normalize(err);
        assert_eq!(public.public_message(), PublicError::GENERIC_MESSAGE);
        assert_eq!(public.log_description(), "boom");
        assert!(public.internal().is_some());
    }

    #[test]
    fn load_errors_render_their_cause() {
        let unreadable = DefinitionProblem::Unreadable("expected `]`".into());
        assert_eq!(unreadable.to_string(), "definition could not be read: expected `]`");

        let unavailable = LoadError::SourceUnavailable {
            location: "plugins".into(),
            source: Box::new(std::io::Error::other("permission denied")),
        };
        assert_eq!(
            unavailable.to_string(),
            "plugin source unavailable at plugins: permission denied"
        );
    }

    #[test]
    fn invalid_definition_names_origin() {
        let err = InvalidDefinition::new("plugins/bad.toml", DefinitionProblem::MissingAction);
        assert_eq!(
            err.to_string(),
            "definition `plugins/bad.toml` rejected: handler does not have an action"
        );
    }
}
