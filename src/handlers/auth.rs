use axum::{
    response::{IntoResponse, Json},
    Extension,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, password_digest, Claims};
use crate::db::repo::user as user_repo;
use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::db_error;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login - verify credentials and issue a bearer token
pub async fn login(Json(body): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let user = user_repo::find_by_username(&body.username)
        .await
        .map_err(db_error("POST /auth/login"))?
        .filter(|u| u.password == password_digest(&body.password))
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let claims = Claims::new(user.id, user.username.clone(), user.is_admin);
    let token = generate_jwt(claims).map_err(|e| {
        tracing::error!("Error in POST /auth/login: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": user
        }
    })))
}

/// GET /api/auth/whoami - echo the authenticated principal
pub async fn whoami(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "user_id": user.user_id,
            "username": user.username,
            "is_admin": user.is_admin
        }
    }))
}
