//! API Gateway definition
//!
//! Owns the HTTP server, the shared middleware stack and the merged
//! `OpenAPI` document of all hosted modules.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use http::{StatusCode, header};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder};

use crate::config::ApiGatewayConfig;
use crate::contracts::RestApiCapability;
use crate::middleware;
use crate::web;

/// HTTP host for REST modules.
#[derive(Debug, Clone, Default)]
pub struct ApiGateway {
    config: ApiGatewayConfig,
}

impl ApiGateway {
    pub const NAME: &'static str = "api_gateway";

    #[must_use]
    pub fn new(config: ApiGatewayConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    /// Build the full router: health endpoints, every module's routes, the
    /// `OpenAPI` document (when enabled), the JSON 404 and 405 fallbacks and
    /// the middleware stack.
    ///
    /// # Errors
    /// Returns an error if a module fails to register its routes or the CORS
    /// configuration is invalid.
    pub fn build_router(&self, modules: &[&dyn RestApiCapability]) -> Result<Router> {
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .route("/healthz", get(web::liveness));

        for module in modules {
            router = module
                .register_rest(router)
                .with_context(|| format!("module '{}' failed to register routes", module.name()))?;
            tracing::debug!(module = module.name(), "Registered module routes");
        }

        if self.config.enable_docs {
            router = Self::add_openapi_routes(router, self.build_openapi(modules));
        }

        router = router
            .fallback(web::not_found)
            .method_not_allowed_fallback(web::method_not_allowed);
        self.apply_middleware_stack(router)
    }

    /// Merge the `OpenAPI` fragments of all modules into one document.
    #[must_use]
    pub fn build_openapi(&self, modules: &[&dyn RestApiCapability]) -> OpenApi {
        let info = InfoBuilder::new()
            .title(self.config.openapi.title.clone())
            .version(self.config.openapi.version.clone())
            .description(self.config.openapi.description.clone())
            .build();
        let mut doc = OpenApiBuilder::new().info(info).build();

        for module in modules {
            if let Some(fragment) = module.openapi() {
                doc.merge(fragment);
            }
        }

        tracing::info!(
            operations = doc.paths.paths.len(),
            "Emitting OpenAPI document"
        );
        doc
    }

    fn add_openapi_routes(router: Router, doc: OpenApi) -> Router {
        let doc = Arc::new(doc);
        router.route(
            "/openapi.json",
            get(move || async move {
                ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
            }),
        )
    }

    fn apply_trace_layer(router: Router) -> Router {
        use tower_http::trace::TraceLayer;
        use tracing::field::Empty;

        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &http::Request<axum::body::Body>| {
                    let rid = req
                        .headers()
                        .get(middleware::request_id::header())
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        module = "api_gateway",
                        request_id = %rid,
                        status = Empty,
                        latency_ms = Empty,
                        "http.user_agent" = req.headers().get(header::USER_AGENT)
                            .and_then(|h| h.to_str().ok())
                            .unwrap_or("unknown")
                    )
                })
                .on_response(
                    |res: &http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                ),
        )
    }

    /// Apply all middleware layers to a router.
    ///
    /// Layers are registered innermost first. At runtime requests flow
    /// outermost to innermost:
    /// `SetRequestId` → `PropagateRequestId` → Trace →
    /// `push_req_id_to_extensions` → Timeout → `BodyLimit` → CORS → Router.
    fn apply_middleware_stack(&self, mut router: Router) -> Result<Router> {
        let config = &self.config;

        // 6) CORS
        if config.cors_enabled {
            router = router.layer(crate::cors::build_cors_layer(config)?);
        }

        // 5) Body limit
        router = router.layer(RequestBodyLimitLayer::new(config.defaults.body_limit_bytes));
        router = router.layer(DefaultBodyLimit::max(config.defaults.body_limit_bytes));

        // 4) Timeout
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(config.defaults.request_timeout_secs),
        ));

        // 3) Record request_id into span + extensions
        router = router.layer(from_fn(middleware::request_id::push_req_id_to_extensions));

        // 2) Trace
        router = Self::apply_trace_layer(router);

        // 1) Request id: set (outermost), then propagate to the response
        let x_request_id = middleware::request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(
            x_request_id,
            middleware::request_id::MakeReqId,
        ));

        Ok(router)
    }

    /// Bind `bind_addr` and serve `router` until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the address is invalid, binding fails, or the
    /// server terminates abnormally.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {addr}");

        Self::serve_with_listener(listener, router, cancel).await
    }

    /// Serve on an already bound listener until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the server terminates abnormally.
    pub async fn serve_with_listener(
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
