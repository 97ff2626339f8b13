//! Store-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading, mutating or persisting stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Task not found in the task store
    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    /// Project not found in the registry
    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    /// Board column definition rejected
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// No project is open
    #[error("No project is open")]
    NoProjectOpen,

    /// Failed to read a board file
    #[error("Failed to load board from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write a board file
    #[error("Failed to save board to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to (de)serialize a board file
    #[error("Failed to serialize board: {0}")]
    SerializationFailed(String),
}
