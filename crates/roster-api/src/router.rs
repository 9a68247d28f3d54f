//! Axum router construction for the roster API.
//!
//! Assembles all routes into a single [`Router`] with CORS and HTTP
//! tracing middleware enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the roster server.
///
/// The router includes:
/// - `GET /` -- HTML roster table
/// - `GET /students` -- list students
/// - `POST /student` -- create a student
/// - `GET /student/{id}` -- single student
/// - `PUT /student/{id}` -- update a student
/// - `DELETE /student/{id}` -- delete a student
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/students", get(handlers::list_students))
        .route("/student", post(handlers::create_student))
        .route(
            "/student/{id}",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
