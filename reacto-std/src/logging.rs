//! `tracing`-backed reaction log.

use reacto_core::{EventSummary, InvalidDefinition, PublicError, ReactionLog};

/// A [`ReactionLog`] that emits every record as a `tracing` event.
///
/// Load failures and faults are logged at `ERROR`, malformed results at
/// `WARN` and handled reactions at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ReactionLog for TracingLog {
    fn load_failed(&self, subsystem: &str, description: &str, cause: &(dyn std::error::Error + 'static)) {
        tracing::error!(subsystem, error = %cause, "{description}");
    }

    fn handler_load_failed(&self, subsystem: &str, origin: &str, cause: &InvalidDefinition) {
        tracing::error!(
            subsystem,
            origin,
            error = %cause.problem,
            "Failed to load reaction handler from {origin}"
        );
    }

    fn reaction_handled(&self, subsystem: &str, event: &EventSummary, handler: &str, accepted: bool) {
        tracing::info!(
            subsystem,
            handler,
            accepted,
            message_id = %event.message_id,
            channel_id = %event.channel_id,
            emoji = %event.emoji,
            user_id = %event.user_id,
            "Reaction handled"
        );
    }

    fn malformed_result(&self, subsystem: &str, handler: &str, description: &str) {
        tracing::warn!(
            subsystem,
            handler,
            result = description,
            "Reaction handler '{handler}' returned an invalid value. It should accept, decline, defer or fail."
        );
    }

    fn fault(&self, subsystem: &str, event: &EventSummary, error: &PublicError, public: bool) {
        let internal = error.internal().map(ToString::to_string);
        tracing::error!(
            subsystem,
            public,
            message_id = %event.message_id,
            channel_id = %event.channel_id,
            emoji = %event.emoji,
            user_id = %event.user_id,
            public_message = error.public_message(),
            internal = internal.as_deref(),
            "{}",
            error.log_description()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reacto_core::{DefinitionProblem, Emoji, UserId};

    fn summary() -> EventSummary {
        EventSummary {
            message_id: "m".into(),
            channel_id: "c".into(),
            emoji: Emoji::new("⭐"),
            user_id: UserId::new("u"),
        }
    }

    // No subscriber is installed; every record must be accepted silently.
    #[test]
    fn records_without_subscriber() {
        let log = TracingLog;
        let io = std::io::Error::other("missing");
        log.load_failed("REACTION MANAGER", "loading failed", &io);
        log.handler_load_failed(
            "REACTION MANAGER",
            "bad.toml",
            &InvalidDefinition::new("bad.toml", DefinitionProblem::MissingName),
        );
        log.reaction_handled("REACTION", &summary(), "star", true);
        log.malformed_result("REACTION", "star", "42");
        log.fault(
            "REACTION",
            &summary(),
            &PublicError::with_generic_message("boom", None),
            true,
        );
    }
}
