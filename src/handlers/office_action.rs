use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;

use crate::db::repo::office_action as repo;
use crate::db::repo::office_action::OfficeActionPayload;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{db_error, log_zero_rows};

/// GET /api/office_action/by_application/:applicationId
pub async fn list_by_application(
    Extension(user): Extension<AuthUser>,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::list_by_application(user.principal(), application_id)
        .await
        .map_err(db_error("GET /api/office_action/by_application"))?;

    Ok(Json(json!({ "success": true, "data": rows })))
}

/// POST /api/office_action/add
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<OfficeActionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::insert(user.principal(), &payload)
        .await
        .map_err(db_error("POST /api/office_action/add"))?;
    log_zero_rows("POST /api/office_action/add", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// PUT /api/office_action/edit/:officeActionId
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(office_action_id): Path<i32>,
    Json(payload): Json<OfficeActionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::update(user.principal(), office_action_id, &payload)
        .await
        .map_err(db_error("PUT /api/office_action/edit"))?;
    log_zero_rows("PUT /api/office_action/edit", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// DELETE /api/office_action/delete/:officeActionId
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(office_action_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::delete(user.principal(), office_action_id)
        .await
        .map_err(db_error("DELETE /api/office_action/delete"))?;
    log_zero_rows("DELETE /api/office_action/delete", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}
