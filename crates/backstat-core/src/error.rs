//! Shared error type across backstat crates.

use thiserror::Error;

/// Stable error codes surfaced in HTTP error bodies and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed input (datagram, config value).
    BadRequest,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Socket or filesystem failure.
    Io,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Io => "IO",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BackstatError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BackstatError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl BackstatError {
    /// Map internal error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            BackstatError::BadRequest(_) | BackstatError::MissingField(_) => ErrorCode::BadRequest,
            BackstatError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            BackstatError::Io(_) => ErrorCode::Io,
            BackstatError::Internal(_) => ErrorCode::Internal,
        }
    }
}
