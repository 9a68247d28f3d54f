//! REST API endpoint handlers for the roster service.
//!
//! Every handler loads a fresh [`StudentStore`](roster_db::StudentStore)
//! from the shared backend. Mutating handlers hold the write lock from
//! that load until their save completes.
//!
//! Request bodies are extracted as `Result<Json<_>, JsonRejection>` so an
//! unparsable body or a missing `Content-Type` gets the same JSON
//! `Invalid data entries` response as a body that fails validation.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML table of all students |
//! | `GET` | `/students` | List all students |
//! | `GET` | `/student/{id}` | Get a single student |
//! | `POST` | `/student` | Create a student |
//! | `PUT` | `/student/{id}` | Update fields of a student |
//! | `DELETE` | `/student/{id}` | Delete every student with the ID |

use std::fmt::Write as _;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use roster_db::DbError;
use roster_types::{Student, StudentPatch, ValidationError};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- HTML roster table
// ---------------------------------------------------------------------------

/// Serve an HTML page listing every student in a table.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let store = state.load_store().await?;
    let school = escape_html(&state.school_name);

    let mut rows = String::new();
    for student in store.students() {
        let _ = write!(
            rows,
            "\n            <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(student.name()),
            escape_html(student.student_id()),
            student.term(),
        );
    }
    let count = store.len();

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{school} Students</title>
    <style>
        body {{ font-family: sans-serif; padding: 2rem; max-width: 800px; margin: 0 auto; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }}
        th {{ background: #f0f0f0; }}
    </style>
</head>
<body>
    <h1>{school} Students</h1>
    <p>{count} enrolled</p>
    <table>
        <thead>
            <tr><th>Name</th><th>Student ID</th><th>Term</th></tr>
        </thead>
        <tbody>{rows}
        </tbody>
    </table>
</body>
</html>"#
    )))
}

// ---------------------------------------------------------------------------
// GET /students -- list students
// ---------------------------------------------------------------------------

/// Return every student as an array of mappings, in store order.
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.load_store().await?;
    Ok(Json(store.into_students()))
}

// ---------------------------------------------------------------------------
// GET /student/{id} -- single student
// ---------------------------------------------------------------------------

/// Return the student with the given ID.
///
/// With duplicate IDs the most recently added student is returned.
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if student_id.trim().is_empty() {
        return Err(ApiError::MissingId);
    }

    let store = state.load_store().await?;
    let student = store.get_by_id(&student_id).ok_or_else(|| {
        warn!(student_id = %student_id, "Student lookup missed");
        ApiError::NotFound("No such student")
    })?;

    Ok(Json(student.clone()))
}

// ---------------------------------------------------------------------------
// POST /student -- create student
// ---------------------------------------------------------------------------

/// Create a student from `{name, student_id, term?}`.
///
/// Responds `201 Created` with an empty body. Nothing is persisted when
/// the body is rejected.
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let student = request_body(body).and_then(Student::from_mapping).map_err(|e| {
        warn!(error = %e, fields = ?e.invalid_fields(), "Rejected new student");
        ApiError::InvalidData
    })?;

    let _guard = state.lock_writes().await;
    let mut store = state.load_store().await?;
    info!(student_id = student.student_id(), "Adding student");
    store.add(student);
    state.save_store(store).await?;

    Ok(StatusCode::CREATED)
}

// ---------------------------------------------------------------------------
// PUT /student/{id} -- update student
// ---------------------------------------------------------------------------

/// Update the fields present in a partial `{name?, student_id?, term?}`
/// body on the student with the given ID.
///
/// An unknown ID is reported before the body is looked at. The updated
/// record must still be valid, otherwise nothing is persisted. A patch with
/// no recognised fields succeeds without rewriting the roster.
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = request_body(body).and_then(StudentPatch::from_mapping);

    let _guard = state.lock_writes().await;
    let mut store = state.load_store().await?;
    if store.get_by_id(&student_id).is_none() {
        warn!(student_id = %student_id, "Update target missing");
        return Err(ApiError::NotFound("No student found"));
    }

    let patch = patch.map_err(|e| {
        warn!(student_id = %student_id, error = %e, "Rejected student update");
        ApiError::InvalidData
    })?;
    if patch.is_empty() {
        info!(student_id = %student_id, "Empty update, roster unchanged");
        return Ok(StatusCode::CREATED);
    }

    match store.update(&student_id, &patch) {
        Ok(updated) => info!(
            student_id = %student_id,
            new_student_id = updated.student_id(),
            "Updated student"
        ),
        Err(DbError::Validation(e)) => {
            warn!(student_id = %student_id, fields = ?e.invalid_fields(), "Rejected student update");
            return Err(ApiError::InvalidData);
        }
        Err(DbError::NotFound(_)) => return Err(ApiError::NotFound("No student found")),
        Err(e) => return Err(e.into()),
    }
    state.save_store(store).await?;

    Ok(StatusCode::CREATED)
}

// ---------------------------------------------------------------------------
// DELETE /student/{id} -- delete student
// ---------------------------------------------------------------------------

/// Delete every student with the given ID.
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let _guard = state.lock_writes().await;
    let mut store = state.load_store().await?;

    if !store.delete(&student_id) {
        warn!(student_id = %student_id, "Delete target missing");
        return Err(ApiError::NotFound("Student not found"));
    }
    state.save_store(store).await?;
    info!(student_id = %student_id, "Deleted student");

    Ok(StatusCode::CREATED)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap an extracted JSON body, treating any rejection as malformed input.
fn request_body(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<serde_json::Value, ValidationError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ValidationError::Malformed(rejection.body_text()))
}

/// Escape text for inclusion in HTML element content.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
