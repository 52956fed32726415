//! Handler outcomes and conversions into them.

use crate::error::{BoxError, PublicError};
use futures::future::{BoxFuture, FutureExt};
use std::{fmt, future::Future};

/// A deferred handler result.
///
/// Resolves to `Ok(())` when the handler finished its work, or to the error
/// that should be routed to the fault handler.
pub type Pending = BoxFuture<'static, Result<(), BoxError>>;

/// What a handler did with a reaction event.
///
/// `Accepted`, `Deferred` and `Failed` claim the event and stop arbitration.
/// `Declined` and `Malformed` let the next handler try.
pub enum Outcome {
    /// The handler fully processed the event.
    Accepted,
    /// The handler refuses the event.
    Declined,
    /// The handler claimed the event and will finish asynchronously.
    Deferred(Pending),
    /// The handler claimed the event and failed.
    Failed(BoxError),
    /// The handler produced a result that is not a verdict.
    Malformed(String),
}

impl Outcome {
    /// Claim the event and finish the work in `future`.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future + Send + 'static,
        F::Output: IntoResolution,
    {
        Outcome::Deferred(future.map(IntoResolution::into_resolution).boxed())
    }

    /// Claim the event and report a failure with the generic public message.
    pub fn failed(log_description: impl Into<String>) -> Self {
        Outcome::Failed(Box::new(PublicError::with_generic_message(
            log_description,
            None,
        )))
    }

    /// Report a result that is not a verdict.
    pub fn malformed(value: impl fmt::Debug) -> Self {
        Outcome::Malformed(format!("{value:?}"))
    }

    /// Whether this outcome stops arbitration.
    pub fn claims(&self) -> bool {
        matches!(
            self,
            Outcome::Accepted | Outcome::Deferred(_) | Outcome::Failed(_)
        )
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted => f.write_str("Accepted"),
            Outcome::Declined => f.write_str("Declined"),
            Outcome::Deferred(_) => f.write_str("Deferred(..)"),
            Outcome::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
            Outcome::Malformed(desc) => f.debug_tuple("Malformed").field(desc).finish(),
        }
    }
}

/// Trait for converting an action's return value into an [`Outcome`].
///
/// # Default Implementations
///
/// - `bool` → `true` = Accepted, `false` = Declined
/// - `Outcome` → As is
/// - `String` / `&'static str` → Failed, the string being the log description
/// - `Result<T, E>` → Delegates to inner `T`, or Failed
/// - `()` / `None` → Malformed
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a reaction outcome",
    label = "missing `IntoOutcome` implementation",
    note = "Actions should return `bool`, `Outcome`, or `Result<_, _>`."
)]
pub trait IntoOutcome {
    /// Convert the value into an outcome.
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Outcome {
        if self {
            Outcome::Accepted
        } else {
            Outcome::Declined
        }
    }
}

impl IntoOutcome for String {
    fn into_outcome(self) -> Outcome {
        Outcome::failed(self)
    }
}

impl IntoOutcome for &'static str {
    fn into_outcome(self) -> Outcome {
        Outcome::failed(self)
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Outcome::Malformed("no value".to_owned())
    }
}

impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Outcome {
        match self {
            Some(t) => t.into_outcome(),
            None => Outcome::Malformed("None".to_owned()),
        }
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Outcome::Failed(e.into()),
        }
    }
}

/// Trait for converting the output of a deferred computation into its resolution.
///
/// A string resolves to a failure whose log description is the string;
/// anything else that is not an error resolves to success.
pub trait IntoResolution {
    /// Convert the value into a resolution.
    fn into_resolution(self) -> Result<(), BoxError>;
}

impl IntoResolution for () {
    fn into_resolution(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl IntoResolution for bool {
    fn into_resolution(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl IntoResolution for String {
    fn into_resolution(self) -> Result<(), BoxError> {
        Err(Box::new(PublicError::with_generic_message(self, None)))
    }
}

impl IntoResolution for &'static str {
    fn into_resolution(self) -> Result<(), BoxError> {
        self.to_owned().into_resolution()
    }
}

impl<T, E> IntoResolution for Result<T, E>
where
    T: IntoResolution,
    E: Into<BoxError>,
{
    fn into_resolution(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_resolution(),
            Err(e) => Err(e.into()),
        }
    }
}
