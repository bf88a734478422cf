//! Error types for riskmap-taxonomy.

use crate::NodePath;
use thiserror::Error;

/// Errors raised while loading catalogs or accepting externally produced
/// hierarchies.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// A node weight was negative, NaN or infinite.
    #[error("invalid value {value} at {path}: weights must be finite and non-negative")]
    InvalidValue { path: NodePath, value: f64 },

    /// Two siblings share a name, so structural paths would be ambiguous.
    #[error("duplicate name '{name}' under {path}")]
    DuplicateName { path: NodePath, name: String },

    /// A scenario name is shared across mechanisms or with a mechanism.
    #[error("scenario '{name}' is not unique across mechanisms")]
    AmbiguousScenario { name: String },

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML input.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
