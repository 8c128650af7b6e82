use axum::response::{IntoResponse, Json};
use serde_json::json;

use crate::db::repo::status as repo;
use crate::error::ApiError;

use super::db_error;

/// GET /api/status/ - reference list, no ownership filtering
pub async fn list() -> Result<impl IntoResponse, ApiError> {
    let rows = repo::list().await.map_err(db_error("GET /api/status"))?;

    Ok(Json(json!({ "success": true, "data": rows })))
}
