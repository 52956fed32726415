//! Built-in handlers and wrappers for handler results.

#[cfg(feature = "timeout")]
pub mod timeout;
pub mod user_channel;

#[cfg(feature = "timeout")]
pub use timeout::with_deadline;
pub use user_channel::{HOOK_HANDLER_NAME, HookCallback, ReactionHooks};
