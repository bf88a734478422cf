//! Error types for riskmap-treemap.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::TreemapConfig`].
///
/// Layout passes never fail; only configuration input does.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field holds a value the layout cannot honour.
    #[error("invalid config field '{field}': {message}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
