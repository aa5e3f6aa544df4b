use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Convenient result alias for the EV range library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied coordinates or range were missing or out of bounds.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The routing backend could not be reached, timed out, or answered with a
    /// non-success status.
    #[error("routing backend unavailable: {message}")]
    BackendUnavailable {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The routing backend answered but the payload lacked a usable distance.
    #[error("malformed routing response: {message}")]
    MalformedResponse { message: String },

    /// A configuration value could not be parsed or was out of range.
    #[error("invalid configuration for {key}: {message}")]
    Configuration { key: String, message: String },
}

impl Error {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedResponse {
            message: message.into(),
        }
    }

    pub(crate) fn unavailable(message: impl Into<String>, source: reqwest::Error) -> Self {
        Error::BackendUnavailable {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Classify this error for display layers and exit codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. } => ErrorKind::InvalidInput,
            Error::BackendUnavailable { .. } => ErrorKind::BackendUnavailable,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    BackendUnavailable,
    MalformedResponse,
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::BackendUnavailable => "backend_unavailable",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(value)
    }
}
