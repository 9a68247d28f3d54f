//! Persistence backend abstraction.
//!
//! A backend stores the roster as one opaque blob. It knows nothing about
//! students: encoding and validation belong to [`StudentStore`]. Writes
//! replace the previous blob entirely; there are no incremental writes.
//!
//! [`StudentStore`]: crate::StudentStore

use std::sync::RwLock;

use crate::error::DbError;

/// Durable storage for the serialized roster.
pub trait Backend: Send + Sync {
    /// Read the full stored blob.
    fn read_blob(&self) -> Result<Vec<u8>, DbError>;

    /// Replace the stored blob with `blob`.
    fn write_blob(&self, blob: &[u8]) -> Result<(), DbError>;
}

/// Backend that keeps the blob in process memory.
///
/// Starts as an empty JSON array. Used by tests and by callers that embed
/// the roster without a data file.
#[derive(Debug)]
pub struct MemoryBackend {
    blob: RwLock<Vec<u8>>,
}

impl MemoryBackend {
    /// Create a backend holding an empty roster.
    pub fn new() -> Self {
        Self::with_blob(b"[]".to_vec())
    }

    /// Create a backend holding `blob` verbatim.
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: RwLock::new(blob.into()),
        }
    }

    /// Current blob as UTF-8 text (lossy).
    pub fn contents(&self) -> Result<String, DbError> {
        let blob = self.read_blob()?;
        Ok(String::from_utf8_lossy(&blob).into_owned())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn read_blob(&self) -> Result<Vec<u8>, DbError> {
        let guard = self
            .blob
            .read()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        Ok(guard.clone())
    }

    fn write_blob(&self, blob: &[u8]) -> Result<(), DbError> {
        let mut guard = self
            .blob
            .write()
            .map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        *guard = blob.to_vec();
        Ok(())
    }
}
