// --- File: crates/coinramp_common/src/routes.rs ---

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Creates a router containing routes shared by every deployment.
pub fn routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
