//! Shared fault handler.

use reacto_core::{BoxError, EventSummary, HandlerFault, PublicError, ReactionLog};
use std::any::Any;

/// Normalize `err` into a [`PublicError`] and log it against `event`.
pub(crate) fn report_fault(log: &dyn ReactionLog, subsystem: &str, event: &EventSummary, err: BoxError) {
    let public = PublicError::normalize(err);
    log.fault(subsystem, event, &public, true);
}

/// Turn a caught panic payload into a fault naming the handler.
pub(crate) fn panic_fault(handler: &str, payload: Box<dyn Any + Send>) -> BoxError {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    };
    HandlerFault::Panicked {
        handler: handler.to_owned(),
        message,
    }
    .into()
}
