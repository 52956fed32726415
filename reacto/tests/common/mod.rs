#![allow(dead_code)]

use reacto::{
    DispatcherConfig, Emoji, HandlerDefinition, MessageRef, Outcome, ReactionDispatcher,
    ReactionEvent, UserId,
    statistics::InMemoryStatistics,
    testing::RecordingLog,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// Fixtures
// ============================================================================

pub struct Harness {
    pub dispatcher: ReactionDispatcher<MessageRef>,
    pub log: RecordingLog,
    pub statistics: InMemoryStatistics,
}

pub fn harness() -> Harness {
    harness_with(DispatcherConfig::default())
}

pub fn harness_with(config: DispatcherConfig) -> Harness {
    let log = RecordingLog::new();
    let statistics = InMemoryStatistics::new();
    let dispatcher = ReactionDispatcher::builder()
        .config(config)
        .log(log.clone())
        .statistics(statistics.clone())
        .build();
    Harness {
        dispatcher,
        log,
        statistics,
    }
}

pub fn event(emoji: &str) -> ReactionEvent<MessageRef> {
    ReactionEvent::new(MessageRef::new("msg-1", "general"), emoji, "user-1")
}

pub fn user() -> UserId {
    UserId::new("user-1")
}

// ============================================================================
// Handlers
// ============================================================================

/// Accepts only the given emoji, counting every invocation.
pub fn emoji_handler(
    name: &str,
    emoji: &'static str,
    calls: Arc<AtomicUsize>,
) -> HandlerDefinition<MessageRef> {
    HandlerDefinition::new(name, move |_: &MessageRef, e: &Emoji, _: &UserId| {
        calls.fetch_add(1, Ordering::SeqCst);
        e.as_str() == emoji
    })
}

/// Returns a fixed outcome built by `make`, counting every invocation.
pub fn outcome_handler<F>(name: &str, calls: Arc<AtomicUsize>, make: F) -> HandlerDefinition<MessageRef>
where
    F: Fn() -> Outcome + Send + Sync + 'static,
{
    HandlerDefinition::new(name, move |_: &MessageRef, _: &Emoji, _: &UserId| {
        calls.fetch_add(1, Ordering::SeqCst);
        make()
    })
}

pub fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

pub fn count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}
