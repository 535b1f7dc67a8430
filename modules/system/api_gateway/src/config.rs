use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// API gateway configuration (`modules.api_gateway.config`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiGatewayConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Serve the merged `OpenAPI` document at `/openapi.json`.
    #[serde(default = "default_true")]
    pub enable_docs: bool,

    #[serde(default)]
    pub cors_enabled: bool,

    /// Ignored unless `cors_enabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsConfig>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub openapi: OpenApiInfoConfig,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            enable_docs: true,
            cors_enabled: false,
            cors: None,
            defaults: Defaults::default(),
            openapi: OpenApiInfoConfig::default(),
        }
    }
}

impl ApiGatewayConfig {
    /// Parse `bind_addr` into a socket address.
    ///
    /// # Errors
    /// Returns an error if `bind_addr` is not `host:port` with an IP host.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {e}", self.bind_addr))
    }

    /// Keep the configured host but listen on `port`.
    ///
    /// # Errors
    /// Returns an error if the current `bind_addr` cannot be parsed.
    pub fn set_port(&mut self, port: u16) -> anyhow::Result<()> {
        let mut addr = self.socket_addr()?;
        addr.set_port(port);
        self.bind_addr = addr.to_string();
        Ok(())
    }
}

/// Limits applied to every route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Requests with larger bodies are answered with `413`.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,

    /// Requests running longer are answered with `504`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default = "wildcard")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "wildcard")]
    pub allowed_headers: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

fn wildcard() -> Vec<String> {
    vec!["*".to_owned()]
}

fn default_methods() -> Vec<String> {
    ["GET", "POST", "OPTIONS"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_max_age() -> u64 {
    600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: wildcard(),
            allowed_methods: default_methods(),
            allowed_headers: wildcard(),
            allow_credentials: false,
            max_age_seconds: default_max_age(),
        }
    }
}

/// Title and version of the emitted `OpenAPI` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenApiInfoConfig {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for OpenApiInfoConfig {
    fn default() -> Self {
        Self {
            title: "Matrix Calculator API".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            description: None,
        }
    }
}
