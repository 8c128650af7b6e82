use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::jwt_auth_middleware;

/// Assemble the full application router. Everything under /api requires a
/// bearer token; / and /auth/login are public.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/login", post(handlers::auth::login))
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router {
    Router::new()
        .merge(application_routes())
        .merge(office_action_routes())
        .merge(issue_routes())
        .merge(response_text_routes())
        .merge(status_routes())
        .route("/api/auth/whoami", get(handlers::auth::whoami))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

fn application_routes() -> Router {
    use handlers::application;

    Router::new()
        .route("/api/application/status", get(application::list))
        .route("/api/application/:applicationId", get(application::get))
        .route("/api/application/add", post(application::create))
        .route("/api/application/edit/:applicationId", put(application::update))
        .route("/api/application/delete/:applicationId", delete(application::delete))
}

fn office_action_routes() -> Router {
    use handlers::office_action;

    Router::new()
        .route(
            "/api/office_action/by_application/:applicationId",
            get(office_action::list_by_application),
        )
        .route("/api/office_action/add", post(office_action::create))
        .route("/api/office_action/edit/:officeActionId", put(office_action::update))
        .route("/api/office_action/delete/:officeActionId", delete(office_action::delete))
}

fn issue_routes() -> Router {
    use handlers::issue;

    Router::new()
        .route(
            "/api/issue/by_office_action/:officeActionId",
            get(issue::list_by_office_action),
        )
        .route("/api/issue/add", post(issue::create))
        .route("/api/issue/edit/:issueId", put(issue::update))
        .route("/api/issue/delete/:issueId", delete(issue::delete))
}

fn response_text_routes() -> Router {
    use handlers::response_text;

    Router::new()
        .route(
            "/api/response_text/by_office_action/:officeActionId",
            get(response_text::list_by_office_action),
        )
        .route("/api/response_text/add", post(response_text::create))
        .route("/api/response_text/edit/:responseId", put(response_text::update))
        .route("/api/response_text/delete/:responseId", delete(response_text::delete))
}

fn status_routes() -> Router {
    use handlers::status;

    // The original surface exposes the collection at the trailing-slash path
    Router::new()
        .route("/api/status", get(status::list))
        .route("/api/status/", get(status::list))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Patent Track API",
            "version": version,
            "description": "Patent prosecution tracking backend (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "login": "/auth/login (public - token acquisition)",
                "application": "/api/application/* (protected)",
                "office_action": "/api/office_action/* (protected)",
                "issue": "/api/issue/* (protected)",
                "response_text": "/api/response_text/* (protected)",
                "status": "/api/status (protected, read-only)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::db::manager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
