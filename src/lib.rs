pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{jwt_auth_middleware, validate_design_create, validate_design_update};
use crate::store::DesignStore;

/// Injected dependencies shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DesignStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/api/health", get(handlers::health))
        // Protected resource API
        .merge(design_routes(state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Request pipeline per route: auth gate -> validation gate (writes only) ->
/// handler. The gates short-circuit with their own response envelopes.
fn design_routes(state: AppState) -> Router {
    let reads = Router::new()
        .route("/api/designs", get(handlers::designs::list))
        .route(
            "/api/designs/:id",
            get(handlers::designs::get).delete(handlers::designs::delete),
        );

    let creates = Router::new()
        .route("/api/designs", post(handlers::designs::create))
        .route_layer(axum::middleware::from_fn(validate_design_create));

    let updates = Router::new()
        .route("/api/designs/:id", put(handlers::designs::update))
        .route_layer(axum::middleware::from_fn(validate_design_update));

    reads
        .merge(creates)
        .merge(updates)
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
        .with_state(state)
}
