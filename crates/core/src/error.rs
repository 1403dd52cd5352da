//! Error types for deptrag.
//!
//! A single error enum covers every failure category in the workspace.
//! Retrieval and generation failures are separate variants so callers can
//! tell an unavailable search index apart from an unavailable model.

use thiserror::Error;

/// Unified error type for deptrag.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors (transport, status, decoding)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Invalid or unauthorized search scope
    #[error("Scope error: {0}")]
    Scope(String),

    /// The search index was unreachable, rejected the request, or answered
    /// with something that could not be decoded
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// The generative model was unreachable, rejected the request, or
    /// produced no usable choice
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Record-management (catalog) errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error came from the retrieval stage.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, AppError::Retrieval(_))
    }

    /// Whether this error came from the generation stage.
    pub fn is_generation(&self) -> bool {
        matches!(self, AppError::Generation(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
