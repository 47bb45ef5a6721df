use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use super::bookings::encode_json;

/// Unauthenticated liveness probe.
pub async fn health() -> Response {
    encode_json(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}
