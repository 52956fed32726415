//! Dispatcher configuration.

use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Errors raised while reading a [`DispatcherConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// The TOML was invalid.
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration of a [`ReactionDispatcher`](crate::ReactionDispatcher).
///
/// ```toml
/// plugin_location = "reaction_processors"
/// deferred_deadline_ms = 30000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Location handed to the plugin source on every load.
    pub plugin_location: PathBuf,
    /// Deadline for deferred handler results, in milliseconds. Unset means none.
    pub deferred_deadline_ms: Option<u64>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            plugin_location: PathBuf::from("reaction_processors"),
            deferred_deadline_ms: None,
        }
    }
}

impl DispatcherConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the plugin location.
    pub fn with_plugin_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.plugin_location = location.into();
        self
    }

    /// Set the deferred deadline.
    pub fn with_deferred_deadline(mut self, deadline: Duration) -> Self {
        self.deferred_deadline_ms = Some(u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// The deferred deadline, if any.
    pub fn deferred_deadline(&self) -> Option<Duration> {
        self.deferred_deadline_ms.map(Duration::from_millis)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deferred_deadline_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "deferred_deadline_ms must be greater than 0".to_string(),
            ));
        }
        if self.plugin_location.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "plugin_location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = DispatcherConfig::from_toml_str("").unwrap();
        assert_eq!(config, DispatcherConfig::default());
        assert_eq!(config.deferred_deadline(), None);
    }

    #[test]
    fn parses_all_fields() {
        let config = DispatcherConfig::from_toml_str(
            "plugin_location = \"plugins/reactions\"\ndeferred_deadline_ms = 250\n",
        )
        .unwrap();
        assert_eq!(config.plugin_location, PathBuf::from("plugins/reactions"));
        assert_eq!(config.deferred_deadline(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn rejects_zero_deadline_and_unknown_keys() {
        assert!(matches!(
            DispatcherConfig::from_toml_str("deferred_deadline_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DispatcherConfig::from_toml_str("plugins = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reacto.toml");
        std::fs::write(&path, "plugin_location = \"handlers\"").unwrap();
        let config = DispatcherConfig::from_path(&path).unwrap();
        assert_eq!(config.plugin_location, PathBuf::from("handlers"));

        let missing = DispatcherConfig::from_path(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
