pub mod designs;

use axum::Json;
use serde_json::{json, Value};

/// GET /api/health - public liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Matty API is running"
    }))
}
