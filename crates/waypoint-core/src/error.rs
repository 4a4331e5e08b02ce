//! Error types for the advisor library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for catalog loading and advisor queries.
///
/// Every variant is deterministic for a given input; nothing here is
/// retryable because the advisor performs no I/O of its own.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Catalog integrity problems (cycles, dangling references, missing
    /// fields). Fatal at load time.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The caller referenced an action that is not in the catalog
    #[error("Unknown action '{id}'")]
    UnknownAction { id: String },
    /// Invalid caller-supplied snapshot data
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG base directory errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AdvisorError {
        AdvisorError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AdvisorError {
    /// Creates a configuration error with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an unknown action error for the given id.
    pub fn unknown_action(id: impl Into<String>) -> Self {
        Self::UnknownAction { id: id.into() }
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether the error was caused by the caller rather than the catalog
    /// or the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AdvisorError::UnknownAction { .. } | AdvisorError::InvalidInput { .. }
        )
    }
}

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;
