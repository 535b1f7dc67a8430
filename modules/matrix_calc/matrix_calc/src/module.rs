//! Matrix Calculator module definition

use std::sync::Arc;

use anyhow::Result;
use api_gateway::contracts::RestApiCapability;
use axum::Router;
use utoipa::OpenApi;

use crate::api::rest::{openapi::MatrixCalcApi, routes};
use crate::config::MatrixCalcConfig;
use crate::domain::Service;

/// Matrix calculator module.
///
/// Owns the domain [`Service`] and contributes the `/rest/...` routes to
/// the gateway router.
#[derive(Debug, Clone)]
pub struct MatrixCalc {
    service: Arc<Service>,
}

impl MatrixCalc {
    pub const NAME: &'static str = "matrix_calc";

    #[must_use]
    pub fn new(config: MatrixCalcConfig) -> Self {
        tracing::info!(
            log_request_bodies = config.log_request_bodies,
            "Initializing matrix_calc module"
        );
        Self {
            service: Arc::new(Service::new(config)),
        }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }
}

impl Default for MatrixCalc {
    fn default() -> Self {
        Self::new(MatrixCalcConfig::default())
    }
}

impl RestApiCapability for MatrixCalc {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn register_rest(&self, router: Router) -> Result<Router> {
        tracing::info!("Registering matrix_calc REST routes");
        let router = routes::register_routes(router, self.service());
        tracing::info!("matrix_calc REST routes registered");
        Ok(router)
    }

    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        Some(MatrixCalcApi::openapi())
    }
}
