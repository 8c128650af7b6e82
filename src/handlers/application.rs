use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;

use crate::db::repo::application as repo;
use crate::db::repo::application::ApplicationPayload;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{db_error, log_zero_rows};

/// GET /api/application/status - list applications with their status label
pub async fn list(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::list_with_status(user.principal())
        .await
        .map_err(db_error("GET /api/application/status"))?;

    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/application/:applicationId
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let row = repo::fetch(user.principal(), application_id)
        .await
        .map_err(db_error("GET /api/application/:applicationId"))?
        .ok_or_else(|| ApiError::not_found(format!("application {} not found", application_id)))?;

    Ok(Json(json!({ "success": true, "data": row })))
}

/// POST /api/application/add
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ApplicationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::insert(user.principal(), &payload)
        .await
        .map_err(db_error("POST /api/application/add"))?;
    log_zero_rows("POST /api/application/add", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// PUT /api/application/edit/:applicationId
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(application_id): Path<i32>,
    Json(payload): Json<ApplicationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::update(user.principal(), application_id, &payload)
        .await
        .map_err(db_error("PUT /api/application/edit"))?;
    log_zero_rows("PUT /api/application/edit", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// DELETE /api/application/delete/:applicationId
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::delete(user.principal(), application_id)
        .await
        .map_err(db_error("DELETE /api/application/delete"))?;
    log_zero_rows("DELETE /api/application/delete", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}
