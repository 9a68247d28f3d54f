//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`]. Backend I/O failures are not
//! retried or swallowed; the caller decides how to surface them.

use std::path::PathBuf;

use roster_types::ValidationError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Reading or writing the data file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The stored document is not a JSON array, or the store could not be
    /// encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted entry is not a valid student. The whole load fails.
    #[error("Invalid student at index {index}: {source}")]
    InvalidEntry {
        /// Position of the entry in the stored array.
        index: usize,
        /// Why the entry was rejected.
        source: ValidationError,
    },

    /// An update would have produced an invalid student.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No student has the given ID.
    #[error("Student not found: {0}")]
    NotFound(String),

    /// A backend lock was poisoned by a panicking writer.
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}
