use axum::Json;
use serde_json::{json, Value};

use crate::config::ServiceKind;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(service: ServiceKind) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": format!("chirp-{}", service.name())
    }))
}
