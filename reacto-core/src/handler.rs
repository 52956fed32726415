//! # Handlers
//!
//! A [`ReactionHandler`] wraps one plugin's name and action. It is a pure
//! callable wrapper: [`ReactionHandler::handle`] returns whatever the action
//! produced, and all arbitration policy lives in the dispatcher.
//!
//! Plugin sources hand raw [`HandlerDefinition`]s to the dispatcher, which
//! validates them with `ReactionHandler::try_from`.

use crate::{
    error::{DefinitionProblem, InvalidDefinition},
    event::{Emoji, MessageContext, ReactionEvent, UserId},
    outcome::{IntoOutcome, Outcome},
};
use std::{fmt, sync::Arc};

/// The callable part of a handler.
///
/// Implemented for every `Fn(&M, &Emoji, &UserId) -> O` where `O: IntoOutcome`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a reaction action for messages of type `{M}`",
    label = "missing `Action<{M}>` implementation",
    note = "Actions take `(&{M}, &Emoji, &UserId)` and return something implementing `IntoOutcome`."
)]
pub trait Action<M: MessageContext>: Send + Sync + 'static {
    /// Consider the reaction and report what was done with it.
    fn act(&self, message: &M, emoji: &Emoji, user_id: &UserId) -> Outcome;
}

// Blanket impl for closures
impl<M, F, O> Action<M> for F
where
    M: MessageContext,
    F: Fn(&M, &Emoji, &UserId) -> O + Send + Sync + 'static,
    O: IntoOutcome,
{
    fn act(&self, message: &M, emoji: &Emoji, user_id: &UserId) -> Outcome {
        (self)(message, emoji, user_id).into_outcome()
    }
}

/// A shared, type-erased action.
pub type SharedAction<M> = Arc<dyn Action<M>>;

/// A field of a raw definition, as read from an untyped source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The field was not given.
    Missing,
    /// The field was given with the wrong type; holds the type found.
    Mistyped(&'static str),
    /// The field was given.
    Present(T),
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Present(v),
            None => Field::Missing,
        }
    }
}

/// A raw handler definition as produced by a plugin source.
pub struct HandlerDefinition<M: MessageContext> {
    /// File or definition identity, used when logging rejections.
    pub origin: String,
    /// The handler name.
    pub name: Field<String>,
    /// The handler action.
    pub action: Field<SharedAction<M>>,
}

impl<M: MessageContext> HandlerDefinition<M> {
    /// Create a complete definition from a name and a closure.
    pub fn new<F, O>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&M, &Emoji, &UserId) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        let name = name.into();
        Self {
            origin: name.clone(),
            name: Field::Present(name),
            action: Field::Present(Arc::new(action)),
        }
    }

    /// Set the origin reported when this definition is rejected.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}

impl<M: MessageContext> Clone for HandlerDefinition<M> {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin.clone(),
            name: self.name.clone(),
            action: self.action.clone(),
        }
    }
}

impl<M: MessageContext> fmt::Debug for HandlerDefinition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match &self.action {
            Field::Missing => "missing",
            Field::Mistyped(found) => *found,
            Field::Present(_) => "present",
        };
        f.debug_struct("HandlerDefinition")
            .field("origin", &self.origin)
            .field("name", &self.name)
            .field("action", &action)
            .finish()
    }
}

/// A validated handler: a name and an action.
///
/// Immutable after construction.
pub struct ReactionHandler<M: MessageContext> {
    name: Arc<str>,
    action: SharedAction<M>,
}

impl<M: MessageContext> ReactionHandler<M> {
    /// Create a handler from a name and a closure.
    pub fn new<F, O>(name: impl Into<String>, action: F) -> Result<Self, InvalidDefinition>
    where
        F: Fn(&M, &Emoji, &UserId) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        Self::try_from(HandlerDefinition::new(name, action))
    }

    /// The handler name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle on the handler name.
    pub fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Invoke the action with the event's message, emoji and user.
    ///
    /// The action's outcome is returned unmodified.
    pub fn handle(&self, event: &ReactionEvent<M>) -> Outcome {
        self.action.act(&event.message, &event.emoji, &event.user_id)
    }
}

impl<M: MessageContext> TryFrom<HandlerDefinition<M>> for ReactionHandler<M> {
    type Error = InvalidDefinition;

    fn try_from(definition: HandlerDefinition<M>) -> Result<Self, Self::Error> {
        let HandlerDefinition {
            origin,
            name,
            action,
        } = definition;

        let action = match action {
            Field::Present(action) => action,
            Field::Missing => {
                return Err(InvalidDefinition::new(origin, DefinitionProblem::MissingAction));
            }
            Field::Mistyped(found) => {
                return Err(InvalidDefinition::new(
                    origin,
                    DefinitionProblem::ActionNotCallable(found),
                ));
            }
        };

        let name = match name {
            Field::Present(name) if name.is_empty() => {
                return Err(InvalidDefinition::new(origin, DefinitionProblem::EmptyName));
            }
            Field::Present(name) => name,
            Field::Missing => {
                return Err(InvalidDefinition::new(origin, DefinitionProblem::MissingName));
            }
            Field::Mistyped(found) => {
                return Err(InvalidDefinition::new(
                    origin,
                    DefinitionProblem::NameNotString(found),
                ));
            }
        };

        Ok(Self {
            name: name.into(),
            action,
        })
    }
}

impl<M: MessageContext> Clone for ReactionHandler<M> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            action: Arc::clone(&self.action),
        }
    }
}

impl<M: MessageContext> fmt::Debug for ReactionHandler<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionHandler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MessageRef;
    use std::sync::Mutex;

    fn event() -> ReactionEvent<MessageRef> {
        ReactionEvent::new(MessageRef::new("m1", "c1"), "👍", "u1")
    }

    #[test]
    fn handle_delegates_with_event_fields() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let handler = ReactionHandler::new(
            "recorder",
            move |msg: &MessageRef, emoji: &Emoji, user: &UserId| {
                seen_clone.lock().unwrap().push((
                    msg.id.clone(),
                    emoji.to_string(),
                    user.to_string(),
                ));
                true
            },
        )
        .unwrap();

        assert_eq!(handler.name(), "recorder");
        assert!(matches!(handler.handle(&event()), Outcome::Accepted));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("m1".to_string(), "👍".to_string(), "u1".to_string())]
        );
    }

    #[test]
    fn handle_returns_raw_outcome() {
        let handler =
            ReactionHandler::new("odd", |_: &MessageRef, _: &Emoji, _: &UserId| Outcome::malformed(42))
                .unwrap();
        assert!(matches!(handler.handle(&event()), Outcome::Malformed(d) if d == "42"));
    }

    #[test]
    fn rejects_missing_action() {
        let definition = HandlerDefinition::<MessageRef> {
            origin: "a.toml".into(),
            name: Field::Present("a".into()),
            action: Field::Missing,
        };
        let err = ReactionHandler::try_from(definition).unwrap_err();
        assert_eq!(err.origin, "a.toml");
        assert!(matches!(err.problem, DefinitionProblem::MissingAction));
    }

    #[test]
    fn rejects_uncallable_action() {
        let definition = HandlerDefinition::<MessageRef> {
            origin: "b.toml".into(),
            name: Field::Present("b".into()),
            action: Field::Mistyped("integer"),
        };
        let err = ReactionHandler::try_from(definition).unwrap_err();
        assert!(matches!(err.problem, DefinitionProblem::ActionNotCallable("integer")));
    }

    #[test]
    fn rejects_bad_names() {
        let base = HandlerDefinition::<MessageRef>::new("x", |_: &MessageRef, _: &Emoji, _: &UserId| true);

        let mut missing = base.clone();
        missing.name = Field::Missing;
        assert!(matches!(
            ReactionHandler::try_from(missing).unwrap_err().problem,
            DefinitionProblem::MissingName
        ));

        let mut mistyped = base.clone();
        mistyped.name = Field::Mistyped("array");
        assert!(matches!(
            ReactionHandler::try_from(mistyped).unwrap_err().problem,
            DefinitionProblem::NameNotString("array")
        ));

        let mut empty = base;
        empty.name = Field::Present(String::new());
        assert!(matches!(
            ReactionHandler::try_from(empty).unwrap_err().problem,
            DefinitionProblem::EmptyName
        ));
    }
}
