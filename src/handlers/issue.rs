use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;

use crate::db::repo::issue as repo;
use crate::db::repo::issue::IssuePayload;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{db_error, log_zero_rows};

/// GET /api/issue/by_office_action/:officeActionId
pub async fn list_by_office_action(
    Extension(user): Extension<AuthUser>,
    Path(office_action_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::list_by_office_action(user.principal(), office_action_id)
        .await
        .map_err(db_error("GET /api/issue/by_office_action"))?;

    Ok(Json(json!({ "success": true, "data": rows })))
}

/// POST /api/issue/add
pub async fn create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<IssuePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::insert(user.principal(), &payload)
        .await
        .map_err(db_error("POST /api/issue/add"))?;
    log_zero_rows("POST /api/issue/add", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// PUT /api/issue/edit/:issueId
pub async fn update(
    Extension(user): Extension<AuthUser>,
    Path(issue_id): Path<i32>,
    Json(payload): Json<IssuePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::update(user.principal(), issue_id, &payload)
        .await
        .map_err(db_error("PUT /api/issue/edit"))?;
    log_zero_rows("PUT /api/issue/edit", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

/// DELETE /api/issue/delete/:issueId
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(issue_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = repo::delete(user.principal(), issue_id)
        .await
        .map_err(db_error("DELETE /api/issue/delete"))?;
    log_zero_rows("DELETE /api/issue/delete", rows);

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}
