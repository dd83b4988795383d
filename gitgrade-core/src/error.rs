//! Error types for GitGrade core.

use std::{error::Error, fmt};

/// Error type for GitGrade core operations.
#[derive(Debug)]
pub enum GitGradeError {
    /// Raw metadata or a repository reference was structurally malformed.
    InvalidInput(String),
    /// Repository metadata could not be retrieved.
    Retrieval(String),
    /// A report could not be serialized.
    Serialization(serde_json::Error),
}

impl fmt::Display for GitGradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Retrieval(message) => write!(f, "retrieval failed: {message}"),
            Self::Serialization(err) => write!(f, "serialization error: {err}"),
        }
    }
}

impl Error for GitGradeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::InvalidInput(_) | Self::Retrieval(_) => None,
        }
    }
}

impl From<serde_json::Error> for GitGradeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl GitGradeError {
    /// Whether the error should be answered with a fallback profile.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Self::Retrieval(_))
    }
}

/// Convenience result type for GitGrade core.
pub type Result<T> = std::result::Result<T, GitGradeError>;
