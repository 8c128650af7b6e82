use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;

use crate::db::repo::response_text as repo;
use crate::db::repo::response_text::ResponseTextPayload;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{db_error, log_zero_rows};

/// GET /api/response_text/by_office_action/:officeActionId
pub async fn list_by_office_action(
    Extension(user): Extension<AuthUser>,
    Path(office_action_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::list_by_office_action(user.principal(), office_action_id)
        .await
        .map_err(db_error("GET /api/response_text/by_office_action"))?;

    Ok(Json(json!({ "success": true, "data": rows })))
}

/// POST /api/response_text/add - body {issue_id, text}
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ResponseTextPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::insert(user.principal(), &payload)
        .await
        .map_err(db_error("POST /api/response_text/add"))?;
    log_zero_rows("POST /api/response_text/add", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// PUT /api/response_text/edit/:responseId
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(response_id): Path<i32>,
    Json(payload): Json<ResponseTextPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::update(user.principal(), response_id, &payload)
        .await
        .map_err(db_error("PUT /api/response_text/edit"))?;
    log_zero_rows("PUT /api/response_text/edit", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// DELETE /api/response_text/delete/:responseId
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(response_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::delete(user.principal(), response_id)
        .await
        .map_err(db_error("DELETE /api/response_text/delete"))?;
    log_zero_rows("DELETE /api/response_text/delete", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}
