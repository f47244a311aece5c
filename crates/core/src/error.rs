//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Task text cannot be empty")]
    EmptyText,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("The \"status\" parameter is required")]
    MissingStatus,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific store failure; external [`TaskStore`](crate::task::TaskStore)
    /// implementations map their driver errors into this.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// True for caller mistakes in the request itself, as opposed to a
    /// missing record or a store failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::InvalidStatus(_) | Self::MissingStatus
        )
    }
}
