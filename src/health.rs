//! Endpoints that report whether the service is up.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// The name the service reports in health checks.
pub const SERVICE_NAME: &str = "expense-stats";

/// Report that the API is running.
pub async fn get_root() -> Json<Value> {
    Json(json!({ "message": "Expense Stats - API is running" }))
}

/// Report the health and version of the service.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME,
    }))
}

/// The response for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
