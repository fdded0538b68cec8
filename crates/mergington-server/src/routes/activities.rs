use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Turn a malformed query string into a `detail` body instead of axum's
/// plain-text rejection.
fn email_param(
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<EmailQuery, AppError> {
    query
        .map(|Query(q)| q)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

/// GET /activities — every activity with its current roster.
pub async fn list_activities(State(app): State<AppState>) -> Json<serde_json::Value> {
    let registry = app.registry.read().await;
    Json(serde_json::json!(registry.list()))
}

/// POST /activities/{name}/signup?email= — enroll a student.
pub async fn signup(
    State(app): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let q = email_param(query)?;
    let message = app.registry.write().await.enroll(&name, &q.email)?;
    Ok(Json(serde_json::json!({ "message": message })))
}

/// DELETE /activities/{name}/unregister?email= — withdraw a student.
pub async fn unregister(
    State(app): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let q = email_param(query)?;
    let message = app.registry.write().await.withdraw(&name, &q.email)?;
    Ok(Json(serde_json::json!({ "message": message })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
