mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use matty_api::auth::{generate_token, Claims};

#[tokio::test]
async fn health_endpoint_is_public() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app, Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    Ok(())
}

#[tokio::test]
async fn missing_authorization_header_is_rejected() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app, Method::GET, "/api/designs", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Not authorized"));
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected_without_decoding() -> Result<()> {
    let app = common::test_app();

    let (status, body) =
        common::send(&app, Method::GET, "/api/designs", Some("Basic dXNlcjpwdw=="), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Not authorized"));
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let app = common::test_app();

    let (status, body) =
        common::send(&app, Method::GET, "/api/designs", Some("Bearer not.a.jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Invalid token"));
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let app = common::test_app();

    let now = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4(),
        exp: (now - Duration::hours(2)).timestamp(),
        iat: (now - Duration::hours(3)).timestamp(),
    };
    let bearer = format!("Bearer {}", generate_token(&claims)?);

    let (status, body) =
        common::send(&app, Method::GET, "/api/designs", Some(&bearer), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid token"));
    Ok(())
}

#[tokio::test]
async fn writes_are_gated_by_auth_before_validation() -> Result<()> {
    let app = common::test_app();

    // Body is invalid too, but the auth gate must answer first
    let (status, body) = common::send(
        &app,
        Method::POST,
        "/api/designs",
        None,
        Some(json!({ "title": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Not authorized"));
    Ok(())
}
