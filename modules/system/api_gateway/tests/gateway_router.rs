#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the gateway router: built-in endpoints, fallback,
//! middleware behavior and `OpenAPI` emission.

use anyhow::Result;
use api_gateway::middleware::request_id::XRequestId;
use api_gateway::{ApiGateway, ApiGatewayConfig, Defaults, RestApiCapability};
use axum::{
    Extension, Json, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    routing::post,
};
use serde_json::Value;
use tower::ServiceExt;
use utoipa::OpenApi;

#[utoipa::path(post, path = "/echo", responses((status = 200, body = String)))]
async fn echo(body: String) -> String {
    body
}

async fn whoami(Extension(rid): Extension<XRequestId>) -> Json<Value> {
    Json(serde_json::json!({ "request_id": rid.0 }))
}

#[derive(OpenApi)]
#[openapi(paths(echo))]
struct EchoApi;

struct EchoModule;

impl RestApiCapability for EchoModule {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn register_rest(&self, router: Router) -> Result<Router> {
        Ok(router
            .route("/echo", post(echo))
            .route("/whoami", axum::routing::get(whoami)))
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(EchoApi::openapi())
    }
}

fn router_with(config: ApiGatewayConfig) -> Router {
    ApiGateway::new(config).build_router(&[&EchoModule]).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let router = router_with(ApiGatewayConfig::default());

    let response = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());

    let response = router
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let router = router_with(ApiGatewayConfig::default());
    let response = router
        .oneshot(Request::get("/nope/here").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No route for GET /nope/here");
}

#[tokio::test]
async fn unsupported_method_returns_json_405() {
    let router = router_with(ApiGatewayConfig::default());
    let response = router
        .oneshot(Request::delete("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Method DELETE is not allowed for /health");
}

#[tokio::test]
async fn request_id_is_generated_and_exposed() {
    let router = router_with(ApiGatewayConfig::default());
    let response = router
        .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap()
        .to_owned();
    let json = body_json(response).await;
    assert_eq!(json["request_id"], header.as_str());
}

#[tokio::test]
async fn incoming_request_id_is_preserved() {
    let router = router_with(ApiGatewayConfig::default());
    let response = router
        .oneshot(
            Request::get("/healthz")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let router = router_with(ApiGatewayConfig {
        defaults: Defaults {
            body_limit_bytes: 16,
            ..Defaults::default()
        },
        ..ApiGatewayConfig::default()
    });

    let response = router
        .clone()
        .oneshot(Request::post("/echo").body(Body::from("short")).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::post("/echo")
                .header("content-length", "64")
                .body(Body::from("x".repeat(64)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn openapi_document_merges_modules() {
    let router = router_with(ApiGatewayConfig::default());
    let response = router
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["info"]["title"], "Matrix Calculator API");
    assert!(json["paths"]["/echo"]["post"].is_object());
}

#[tokio::test]
async fn openapi_document_can_be_disabled() {
    let router = router_with(ApiGatewayConfig {
        enable_docs: false,
        ..ApiGatewayConfig::default()
    });
    let response = router
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_preflight_is_answered_when_enabled() {
    let router = router_with(ApiGatewayConfig {
        cors_enabled: true,
        ..ApiGatewayConfig::default()
    });
    let response = router
        .oneshot(
            Request::options("/echo")
                .header("origin", "https://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn serve_stops_on_cancellation() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let router = router_with(ApiGatewayConfig::default());
    let cancel = tokio_util::sync::CancellationToken::new();

    let server = tokio::spawn(ApiGateway::serve_with_listener(
        listener,
        router,
        cancel.clone(),
    ));
    cancel.cancel();

    let result = tokio::time::timeout(std::time::Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
