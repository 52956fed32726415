//! Plugin source trait.

use crate::{
    error::{InvalidDefinition, LoadError},
    event::MessageContext,
    handler::HandlerDefinition,
};
use std::{future::Future, path::Path};

/// One entry listed by a plugin source.
///
/// Entries the source could not even read are reported as
/// `Err(InvalidDefinition)` so they are logged per candidate.
pub type Candidate<M> = Result<HandlerDefinition<M>, InvalidDefinition>;

/// A provider of handler definitions.
///
/// The dispatcher asks the source for the candidates at a location each time
/// it loads. Candidates are used in the order they are returned.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot provide handler definitions for messages of type `{M}`",
    label = "missing `PluginSource<{M}>` implementation",
    note = "Implement `list` to return the candidate definitions at a location."
)]
pub trait PluginSource<M: MessageContext>: Send + Sync {
    /// List the candidate definitions at `location`.
    ///
    /// An error means the location itself could not be enumerated.
    fn list(
        &self,
        location: &Path,
    ) -> impl Future<Output = Result<Vec<Candidate<M>>, LoadError>> + Send;
}
