//! In-process router tests driven with tower's oneshot; nothing here needs
//! the spawned server or a live database.

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use patent_track_api::auth::{generate_jwt, Claims};
use patent_track_api::routes::app;

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let app = app();
    let res = app
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn api_requires_bearer_token() -> Result<()> {
    for path in [
        "/api/status",
        "/api/application/status",
        "/api/office_action/by_application/1",
    ] {
        let res = app()
            .oneshot(Request::builder().uri(path).body(Body::empty())?)
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() -> Result<()> {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn valid_token_reaches_whoami() -> Result<()> {
    let token = generate_jwt(Claims::new(12, "attorney".to_string(), false))?;

    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/auth/whoami")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(res.into_body(), 64 * 1024).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["data"]["user_id"], 12);
    assert_eq!(body["data"]["username"], "attorney");
    assert_eq!(body["data"]["is_admin"], false);

    Ok(())
}
