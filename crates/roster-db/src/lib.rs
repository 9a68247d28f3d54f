//! Data layer for the student roster service.
//!
//! The roster is small and persisted as one JSON document. Every logical
//! operation loads the whole document into a [`StudentStore`], works on it
//! in memory, and (for mutations) writes the whole document back. There is
//! no cache: the backend is always the source of truth.
//!
//! # Architecture
//!
//! ```text
//! Handler
//!     |
//!     +-- StudentStore::load ---> Backend::read_blob
//!     |
//!     +-- get_by_id / get_by_name / add / update / delete (in memory)
//!     |
//!     +-- StudentStore::save ---> Backend::write_blob (whole document)
//! ```
//!
//! # Modules
//!
//! - [`backend`] -- The [`Backend`] trait and the in-memory backend
//! - [`json_file`] -- Flat-file backend with atomic replace
//! - [`student_store`] -- Ordered in-memory collection of students
//! - [`error`] -- Shared error types

pub mod backend;
pub mod error;
pub mod json_file;
pub mod student_store;

// Re-export primary types for convenience.
pub use backend::{Backend, MemoryBackend};
pub use error::DbError;
pub use json_file::JsonFileBackend;
pub use student_store::StudentStore;
