use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use matty_api::auth::{generate_token, Claims};
use matty_api::store::MemoryDesignStore;
use matty_api::{app, AppState};

/// Fresh app over an empty in-memory store
pub fn test_app() -> Router {
    app(AppState {
        store: Arc::new(MemoryDesignStore::new()),
    })
}

/// Mint a valid `Authorization` header value for the given account
pub fn bearer_for(user_id: Uuid) -> String {
    let token = generate_token(&Claims::new(user_id)).expect("failed to mint test token");
    format!("Bearer {}", token)
}

/// Drive one request through the router and decode the JSON response
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, bearer);
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };

    (status, json)
}
