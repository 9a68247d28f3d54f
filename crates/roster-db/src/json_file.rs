//! Flat-file backend: the roster lives in a single JSON file.
//!
//! Writes go to a sibling `*.tmp` file which is synced and then renamed
//! over the target, so readers see either the previous document or the
//! new one, never a truncated file.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::DbError;

/// Document written by [`JsonFileBackend::ensure_initialized`].
const EMPTY_ROSTER: &[u8] = b"[]";

/// [`Backend`] stored as one JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for `path`. Does not touch the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data file (and its parent directory) holding an empty
    /// roster if it does not exist yet.
    ///
    /// Returns `true` when the file was created. An existing file is left
    /// untouched, whatever it contains.
    pub fn ensure_initialized(&self) -> Result<bool, DbError> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| DbError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        self.write_blob(EMPTY_ROSTER)?;
        info!(path = %self.path.display(), "Created empty roster file");
        Ok(true)
    }

    /// Path of the scratch file used during writes.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("roster"), OsString::from);
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self) -> impl FnOnce(std::io::Error) -> DbError + '_ {
        move |source| DbError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Backend for JsonFileBackend {
    fn read_blob(&self) -> Result<Vec<u8>, DbError> {
        let blob = fs::read(&self.path).map_err(self.io_error())?;
        debug!(path = %self.path.display(), bytes = blob.len(), "Read roster file");
        Ok(blob)
    }

    fn write_blob(&self, blob: &[u8]) -> Result<(), DbError> {
        let temp = self.temp_path();
        let temp_error = |source| DbError::Io {
            path: temp.clone(),
            source,
        };

        let mut file = File::create(&temp).map_err(temp_error)?;
        file.write_all(blob).map_err(temp_error)?;
        file.sync_all().map_err(temp_error)?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(self.io_error())?;
        debug!(path = %self.path.display(), bytes = blob.len(), "Wrote roster file");
        Ok(())
    }
}
