//! Errors for configuration, graph sources and persistence.

use maxcut_core::SimError;
use thiserror::Error;

/// Configuration, graph-source and persistence errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No `graphs` section with this identifier.
    #[error("graph '{0}' not found in configuration")]
    GraphNotFound(String),

    /// An edge list that is neither a pair list nor `(u,v);(u,v)` text.
    #[error("malformed edge list '{text}': {reason}")]
    MalformedEdges { text: String, reason: String },

    #[error("JSON error: {0}")]
    JsonError(String),

    /// The random-graph generator never produced an edge.
    #[error("no edge generated after {attempts} attempts")]
    GenerationFailed { attempts: usize },

    #[error(transparent)]
    Graph(#[from] SimError),
}

/// Result type for the I/O layer.
pub type ConfigResult<T> = Result<T, ConfigError>;
