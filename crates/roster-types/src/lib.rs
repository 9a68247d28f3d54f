//! Shared type definitions for the student roster service.
//!
//! This crate owns the single record type of the system, [`Student`], and
//! the rules that make a record valid. Every other crate in the workspace
//! receives students from here already validated.
//!
//! # Modules
//!
//! - [`student`] -- The `Student` record plus its draft and patch input forms
//! - [`error`] -- [`ValidationError`], the only failure a record can produce

pub mod error;
pub mod student;

// Re-export all public types at crate root for convenience.
pub use error::ValidationError;
pub use student::{DEFAULT_TERM, STUDENT_ID_LEN, STUDENT_ID_PREFIX, Student, StudentDraft, StudentPatch};
