//! Directory-backed plugin source.
//!
//! Each plugin is a TOML manifest in a directory:
//!
//! ```toml
//! name = "star-board"
//! action = "star"
//! ```
//!
//! `action` names an entry of an [`ActionCatalog`] of compiled actions.
//! Manifests are read again on every load, so editing a file and reloading
//! the dispatcher picks up the change.

use reacto_core::{
    BoxError, Candidate, DefinitionProblem, Emoji, Field, HandlerDefinition, IntoOutcome,
    InvalidDefinition, LoadError, MessageContext, PluginSource, SharedAction, UserId,
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

/// File extension of plugin manifests.
pub const MANIFEST_EXTENSION: &str = "toml";

/// Compiled actions that manifests can refer to by key.
pub struct ActionCatalog<M: MessageContext> {
    actions: HashMap<String, SharedAction<M>>,
}

impl<M: MessageContext> ActionCatalog<M> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action under `key`, replacing any previous one.
    pub fn register<F, O>(mut self, key: impl Into<String>, action: F) -> Self
    where
        F: Fn(&M, &Emoji, &UserId) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        self.actions.insert(key.into(), Arc::new(action));
        self
    }

    /// Look up an action.
    pub fn get(&self, key: &str) -> Option<SharedAction<M>> {
        self.actions.get(key).cloned()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no action is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<M: MessageContext> Default for ActionCatalog<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// A plugin source reading TOML manifests from a directory.
pub struct DirectorySource<M: MessageContext> {
    catalog: ActionCatalog<M>,
}

impl<M: MessageContext> DirectorySource<M> {
    /// Create a source resolving actions through `catalog`.
    pub fn new(catalog: ActionCatalog<M>) -> Self {
        Self { catalog }
    }

    async fn manifest_paths(location: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(location).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_manifest = path
                .extension()
                .is_some_and(|ext| ext == MANIFEST_EXTENSION);
            if is_manifest && entry.file_type().await?.is_file() {
                paths.push(path);
            }
        }
        // Directory iteration order is platform dependent.
        paths.sort();
        Ok(paths)
    }

    async fn read_candidate(&self, path: &Path) -> Candidate<M> {
        let origin = path.display().to_string();
        let unreadable =
            |err: BoxError| InvalidDefinition::new(origin.clone(), DefinitionProblem::Unreadable(err));

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| unreadable(Box::new(e)))?;
        let manifest: toml::Table = text.parse().map_err(|e: toml::de::Error| unreadable(Box::new(e)))?;

        self.resolve(origin, &manifest)
    }

    fn resolve(&self, origin: String, manifest: &toml::Table) -> Candidate<M> {
        let name = match manifest.get("name") {
            None => Field::Missing,
            Some(toml::Value::String(name)) => Field::Present(name.clone()),
            Some(other) => Field::Mistyped(other.type_str()),
        };

        let action = match manifest.get("action") {
            None => Field::Missing,
            Some(toml::Value::String(key)) => match self.catalog.get(key) {
                Some(action) => Field::Present(action),
                None => {
                    return Err(InvalidDefinition::new(
                        origin,
                        DefinitionProblem::UnknownAction(key.clone()),
                    ));
                }
            },
            Some(other) => Field::Mistyped(other.type_str()),
        };

        Ok(HandlerDefinition {
            origin,
            name,
            action,
        })
    }
}

impl<M: MessageContext> PluginSource<M> for DirectorySource<M> {
    async fn list(&self, location: &Path) -> Result<Vec<Candidate<M>>, LoadError> {
        let paths = Self::manifest_paths(location)
            .await
            .map_err(|e| LoadError::SourceUnavailable {
                location: location.display().to_string(),
                source: Box::new(e),
            })?;

        let mut candidates = Vec::with_capacity(paths.len());
        for path in &paths {
            candidates.push(self.read_candidate(path).await);
        }
        Ok(candidates)
    }
}
