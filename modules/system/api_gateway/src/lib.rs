//! API Gateway
//!
//! Hosts REST modules behind one HTTP server: health endpoints, request ids,
//! tracing, timeouts, body limits, optional CORS, a JSON 404 fallback and the
//! merged `OpenAPI` document at `/openapi.json`.

pub mod config;
pub mod contracts;
pub mod middleware;

mod cors;
mod module;
mod web;

pub use config::{ApiGatewayConfig, CorsConfig, Defaults, OpenApiInfoConfig};
pub use contracts::RestApiCapability;
pub use module::ApiGateway;
