//! Deadline for deferred handler results.
//!
//! **Note**: This module requires the `timeout` feature and a `tokio`
//! runtime built with `enable_time`.

use futures::FutureExt;
use reacto_core::{HandlerFault, Pending};
use std::{
    panic::{self, AssertUnwindSafe},
    time::Duration,
};
use tokio::time::timeout;

/// Wrap a pending result so it fails once `deadline` elapses.
///
/// The inner future is dropped on expiry and the result becomes
/// [`HandlerFault::DeadlineElapsed`] naming `handler`. On a runtime without
/// timers the inner future never runs and the result is
/// [`HandlerFault::TimerUnavailable`].
pub fn with_deadline(pending: Pending, handler: impl Into<String>, deadline: Duration) -> Pending {
    let handler = handler.into();
    async move {
        // tokio panics while creating the timer when time is not enabled.
        let timed = match panic::catch_unwind(AssertUnwindSafe(|| timeout(deadline, pending))) {
            Ok(timed) => timed,
            Err(_) => return Err(HandlerFault::TimerUnavailable { handler }.into()),
        };
        match timed.await {
            Ok(result) => result,
            Err(_) => Err(HandlerFault::DeadlineElapsed { handler, deadline }.into()),
        }
    }
    .boxed()
}
