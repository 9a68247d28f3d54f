//! Shared application state for the roster API.
//!
//! [`AppState`] holds the persistence backend rather than a roster: the
//! backend is the source of truth and every request reloads from it.
//! Backends do synchronous I/O, so loads and saves run on tokio's blocking
//! pool instead of an async worker.

use std::sync::Arc;

use roster_db::{Backend, StudentStore};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::ApiError;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// Where the roster is persisted.
    pub backend: Arc<dyn Backend>,
    /// Institution name shown on the home page.
    pub school_name: String,
    /// Held for the whole load-mutate-save sequence of a mutation.
    write_lock: Mutex<()>,
}

impl AppState {
    /// Create application state over `backend`.
    pub fn new(backend: Arc<dyn Backend>, school_name: impl Into<String>) -> Self {
        Self {
            backend,
            school_name: school_name.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load a fresh store from the backend.
    pub async fn load_store(&self) -> Result<StudentStore, ApiError> {
        let backend = Arc::clone(&self.backend);
        let store =
            tokio::task::spawn_blocking(move || StudentStore::load(backend.as_ref())).await??;
        Ok(store)
    }

    /// Write `store` back to the backend.
    pub async fn save_store(&self, store: StudentStore) -> Result<(), ApiError> {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || store.save(backend.as_ref())).await??;
        Ok(())
    }

    /// Wait for exclusive write access.
    ///
    /// Every handler that saves must hold the returned guard from before
    /// its load until after its save.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("school_name", &self.school_name)
            .finish_non_exhaustive()
    }
}
