//! HTTP API for the student roster service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for listing, reading, creating, updating and
//!   deleting students
//! - **HTML home page** (`GET /`) rendering the roster as a table
//!
//! # Architecture
//!
//! Handlers hold no roster state of their own. Each request loads a fresh
//! [`StudentStore`] from the shared [`Backend`], performs one operation,
//! and mutations write the whole store back before the response is sent.
//! Mutations are serialized through a single lock in [`AppState`] so two
//! concurrent writers cannot overwrite each other's changes.
//!
//! [`StudentStore`]: roster_db::StudentStore
//! [`Backend`]: roster_db::Backend
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
