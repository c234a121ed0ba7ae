use thiserror::Error;

/// Errors that can occur while talking to a media manager backend.
///
/// Only a snapshot failure aborts a run; every other variant is caught at
/// the item boundary and folded into an [`Outcome`](crate::Outcome).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The backend could not be reached, or the snapshot returned a
    /// non-success status.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// A request exceeded its timeout.
    #[error("Request timed out")]
    TimedOut,

    /// An add request was refused; carries the backend's message.
    #[error("{0}")]
    Rejected(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
