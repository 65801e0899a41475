//! Error types for clipgraph.

use thiserror::Error;

/// Main error type for graph construction and frame retrieval.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A filter rejected its inputs. `name` is the filter as it was invoked.
    #[error("{name}: {message}")]
    Filter { name: String, message: String },

    #[error("there is no function named \"{0}\"")]
    UnknownFunction(String),

    #[error("{name}: invalid arguments: {message}")]
    InvalidArguments { name: String, message: String },

    #[error("{0} did not return a clip")]
    NotAClip(String),

    #[error("Audio buffer too small: need {needed} bytes, have {available}")]
    AudioBuffer { needed: usize, available: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    /// Create a filter error.
    pub fn filter(name: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::Filter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an argument binding error.
    pub fn invalid_arguments(name: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::InvalidArguments {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for clipgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
