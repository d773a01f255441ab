//! Domain error types

use thiserror::Error;

/// Failures from the sign-in boundary
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Sign-in task stopped before completing: {0}")]
    Interrupted(String),
}

/// Failures from the data source
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    InvalidState(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DataError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DataError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// A validated form could not be turned into a typed request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing field: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl RequestError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing(field) | Self::Invalid { field, .. } => field,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::Missing(_) => "is required",
            Self::Invalid { reason, .. } => reason,
        }
    }
}

/// Outcome of handing a completed form to its submission boundary
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Reading or writing the stored session record
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
