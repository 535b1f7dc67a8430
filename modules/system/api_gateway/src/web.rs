use axum::Json;
use axum::extract::OriginalUri;
use axum::response::IntoResponse;
use http::{Method, StatusCode};
use serde_json::{Value, json};

/// `GET /health`: JSON status with the current UTC timestamp.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// `GET /healthz`: plain-text liveness probe.
pub async fn liveness() -> &'static str {
    "ok"
}

/// Fallback for requests no route matched.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("No route for {method} {}", uri.path()) })),
    )
}

/// Fallback for a matched path whose route does not accept the method.
pub async fn method_not_allowed(
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": format!("Method {method} is not allowed for {}", uri.path()) })),
    )
}
