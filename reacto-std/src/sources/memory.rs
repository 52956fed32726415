//! In-memory plugin source.

use reacto_core::{Candidate, HandlerDefinition, LoadError, MessageContext, PluginSource};
use std::path::Path;

/// A plugin source backed by a list of definitions built in code.
///
/// The location passed to [`PluginSource::list`] is ignored.
pub struct StaticSource<M: MessageContext> {
    definitions: Vec<HandlerDefinition<M>>,
}

impl<M: MessageContext> StaticSource<M> {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Append a definition.
    pub fn with(mut self, definition: HandlerDefinition<M>) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the source holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<M: MessageContext> Default for StaticSource<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MessageContext> FromIterator<HandlerDefinition<M>> for StaticSource<M> {
    fn from_iter<I: IntoIterator<Item = HandlerDefinition<M>>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}

impl<M: MessageContext> PluginSource<M> for StaticSource<M> {
    async fn list(&self, _location: &Path) -> Result<Vec<Candidate<M>>, LoadError> {
        Ok(self.definitions.iter().cloned().map(Ok).collect())
    }
}
