use resource_sync::{RemoteError, SyncError};
use thiserror::Error;

/// Errors surfaced by the console.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConsoleError {
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Login required")]
    LoginRequired,
    #[error("Login rejected: {0}")]
    LoginRejected(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}
