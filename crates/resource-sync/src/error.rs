//! # Sync Errors
//!
//! This module defines the error types shared by every list controller.
//! Three layers are kept apart so callers can pattern match on what went wrong:
//!
//! - [`FieldError`]: a form value was rejected locally, before any request.
//! - [`RemoteError`]: the remote API failed or refused the request.
//! - [`SyncError`]: anything a controller operation can return, wrapping the two above.

/// Errors produced by local field validation and parsing.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FieldError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    Required(Vec<&'static str>),
    #[error("Invalid value for {field}: {value:?}")]
    Invalid { field: &'static str, value: String },
    #[error("Unknown field: {0}")]
    Unknown(String),
}

/// Errors reported by a [`RemoteStore`](crate::RemoteStore) implementation.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RemoteError {
    /// The request never produced a response (network unreachable, connection reset).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("Rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
    /// The server answered, but the body could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// The human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when the server reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Rejected { status: 404, .. })
    }
}

/// Errors returned by list controller operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SyncError {
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldError),
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("No active edit session")]
    NoActiveEdit,
    #[error("Declined by user")]
    Declined,
    #[error("Controller closed")]
    ControllerClosed,
    #[error("Controller dropped response channel")]
    ControllerDropped,
}
