//! Route registration for the `matrix_calc` module

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::domain::Service;

use super::handlers;

pub const BINARY_PATH: &str = "/rest/{operation}/{first}/{second}";
pub const REDUCTION_PATH: &str = "/rest/{operation}";

/// Register all REST routes for the `matrix_calc` module.
///
/// Both routes accept GET and POST; the body is read either way.
#[must_use]
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            BINARY_PATH,
            get(handlers::binary_operation).post(handlers::binary_operation),
        )
        .route(
            REDUCTION_PATH,
            get(handlers::reduction_operation).post(handlers::reduction_operation),
        )
        .layer(Extension(service))
}
