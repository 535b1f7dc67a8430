//! Contracts between the gateway and the modules it hosts.

use axum::Router;

/// A module that contributes REST routes to the gateway router.
pub trait RestApiCapability: Send + Sync {
    /// Stable module name, used in logs and as the config section key.
    fn name(&self) -> &'static str;

    /// Add the module's routes to `router`.
    ///
    /// # Errors
    /// Returns an error if the module cannot build its routes.
    fn register_rest(&self, router: Router) -> anyhow::Result<Router>;

    /// `OpenAPI` fragment describing the registered routes.
    fn openapi(&self) -> Option<utoipa::openapi::OpenApi> {
        None
    }
}
