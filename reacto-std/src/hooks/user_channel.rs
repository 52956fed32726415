//! User-and-channel hook responder.
//!
//! Parts of a bot that wait for one user's reaction in one channel (paging
//! through results, confirming an action) register a hook here instead of
//! shipping a plugin. The responder is always the last handler the
//! dispatcher tries.

use reacto_core::{
    Emoji, HandlerDefinition, IntoOutcome, MessageContext, Outcome, SharedAction, UserId,
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

/// Name of the built-in hook responder handler.
pub const HOOK_HANDLER_NAME: &str = "user_and_channel_hook";

/// A registered hook callback.
pub type HookCallback<M> = SharedAction<M>;

struct HookEntry<M: MessageContext> {
    callback: HookCallback<M>,
    once: bool,
}

type HookKey = (UserId, String);

/// Hooks keyed by reacting user and channel.
///
/// Cloning shares the registry, so hooks registered after the dispatcher
/// loaded are still seen by its responder.
pub struct ReactionHooks<M: MessageContext> {
    entries: Arc<Mutex<HashMap<HookKey, HookEntry<M>>>>,
}

impl<M: MessageContext> ReactionHooks<M> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register a hook for reactions by `user_id` in `channel_id`.
    ///
    /// Replaces any hook for the same pair; returns whether one was replaced.
    pub fn register<F, O>(&self, user_id: impl Into<UserId>, channel_id: impl Into<String>, callback: F) -> bool
    where
        F: Fn(&M, &Emoji, &UserId) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        self.insert(user_id.into(), channel_id.into(), Arc::new(callback), false)
    }

    /// Register a hook that is removed once it claims an event.
    pub fn register_once<F, O>(
        &self,
        user_id: impl Into<UserId>,
        channel_id: impl Into<String>,
        callback: F,
    ) -> bool
    where
        F: Fn(&M, &Emoji, &UserId) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        self.insert(user_id.into(), channel_id.into(), Arc::new(callback), true)
    }

    /// Remove the hook for `user_id` in `channel_id`.
    pub fn unregister(&self, user_id: &UserId, channel_id: &str) -> bool {
        self.lock()
            .remove(&(user_id.clone(), channel_id.to_owned()))
            .is_some()
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no hook is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The definition of the responder handler.
    ///
    /// The responder declines events with no matching hook and otherwise
    /// returns the hook's outcome.
    pub fn definition(&self) -> HandlerDefinition<M> {
        let hooks = self.clone();
        HandlerDefinition::new(
            HOOK_HANDLER_NAME,
            move |message: &M, emoji: &Emoji, user_id: &UserId| hooks.respond(message, emoji, user_id),
        )
    }

    /// Offer a reaction to the matching hook.
    pub fn respond(&self, message: &M, emoji: &Emoji, user_id: &UserId) -> Outcome {
        let key = (user_id.clone(), message.channel_id().to_owned());
        let (callback, once) = match self.lock().get(&key) {
            Some(entry) => (Arc::clone(&entry.callback), entry.once),
            None => return Outcome::Declined,
        };

        // Lock released: callbacks may register further hooks.
        let outcome = callback.act(message, emoji, user_id);
        if once && outcome.claims() {
            let mut entries = self.lock();
            let same = entries
                .get(&key)
                .is_some_and(|entry| Arc::ptr_eq(&entry.callback, &callback));
            if same {
                entries.remove(&key);
            }
        }
        outcome
    }

    fn insert(&self, user_id: UserId, channel_id: String, callback: HookCallback<M>, once: bool) -> bool {
        self.lock()
            .insert((user_id, channel_id), HookEntry { callback, once })
            .is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<HookKey, HookEntry<M>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M: MessageContext> Default for ReactionHooks<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MessageContext> Clone for ReactionHooks<M> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<M: MessageContext> fmt::Debug for ReactionHooks<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionHooks")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reacto_core::{MessageRef, ReactionEvent, ReactionHandler};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event(user: &str, channel: &str) -> ReactionEvent<MessageRef> {
        ReactionEvent::new(MessageRef::new("m1", channel), "➡️", user)
    }

    #[test]
    fn declines_without_matching_hook() {
        let hooks = ReactionHooks::<MessageRef>::new();
        hooks.register("alice", "general", |_: &MessageRef, _: &Emoji, _: &UserId| true);

        let handler = ReactionHandler::try_from(hooks.definition()).unwrap();
        assert_eq!(handler.name(), HOOK_HANDLER_NAME);
        assert!(matches!(handler.handle(&event("bob", "general")), Outcome::Declined));
        assert!(matches!(handler.handle(&event("alice", "random")), Outcome::Declined));
        assert!(matches!(handler.handle(&event("alice", "general")), Outcome::Accepted));
    }

    #[test]
    fn sees_hooks_registered_after_definition() {
        let hooks = ReactionHooks::<MessageRef>::new();
        let handler = ReactionHandler::try_from(hooks.definition()).unwrap();
        assert!(matches!(handler.handle(&event("alice", "general")), Outcome::Declined));

        hooks.register("alice", "general", |_: &MessageRef, _: &Emoji, _: &UserId| true);
        assert!(matches!(handler.handle(&event("alice", "general")), Outcome::Accepted));
    }

    #[test]
    fn once_hooks_are_removed_after_claiming() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let hooks = ReactionHooks::<MessageRef>::new();
        hooks.register_once("alice", "general", move |_: &MessageRef, emoji: &Emoji, _: &UserId| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            emoji.as_str() == "➡️"
        });

        let e = event("alice", "general");
        let wrong = ReactionEvent::new(MessageRef::new("m1", "general"), "⬅️", "alice");
        assert!(matches!(hooks.respond(&wrong.message, &wrong.emoji, &wrong.user_id), Outcome::Declined));
        assert_eq!(hooks.len(), 1);

        assert!(matches!(hooks.respond(&e.message, &e.emoji, &e.user_id), Outcome::Accepted));
        assert!(hooks.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn register_replaces_and_unregister_removes() {
        let hooks = ReactionHooks::<MessageRef>::new();
        assert!(!hooks.register("alice", "general", |_: &MessageRef, _: &Emoji, _: &UserId| true));
        assert!(hooks.register("alice", "general", |_: &MessageRef, _: &Emoji, _: &UserId| false));
        assert_eq!(hooks.len(), 1);

        assert!(hooks.unregister(&UserId::new("alice"), "general"));
        assert!(!hooks.unregister(&UserId::new("alice"), "general"));
        assert!(hooks.is_empty());
    }
}
