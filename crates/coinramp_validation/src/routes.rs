// --- File: crates/coinramp_validation/src/routes.rs ---

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::registry::RuleRegistry;

/// Creates a router exposing the rule registry.
///
/// The registry is also the router state, so `ValidatedJson` handlers can be
/// added to the returned router as-is.
pub fn routes(registry: Arc<RuleRegistry>) -> Router {
    Router::new()
        .route("/validation/rules", get(list_rules_handler))
        .with_state(registry)
}

async fn list_rules_handler(State(registry): State<Arc<RuleRegistry>>) -> Json<Value> {
    Json(json!({ "rules": registry.names() }))
}
