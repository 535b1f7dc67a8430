use std::time::Duration;

use anyhow::bail;
use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::{ApiGatewayConfig, CorsConfig};

/// Build a CORS layer from config.
///
/// Unparseable origins, methods and headers are skipped with a warning.
///
/// # Errors
/// Returns an error if `allow_credentials` is combined with a wildcard
/// origin, method or header list.
pub fn build_cors_layer(cfg: &ApiGatewayConfig) -> anyhow::Result<CorsLayer> {
    let cors_cfg: CorsConfig = cfg.cors.clone().unwrap_or_default();

    let has_wildcard_origin = cors_cfg.allowed_origins.iter().any(|o| o == "*");
    if cors_cfg.allow_credentials {
        for (field, values) in [
            ("allowed_origins", &cors_cfg.allowed_origins),
            ("allowed_methods", &cors_cfg.allowed_methods),
            ("allowed_headers", &cors_cfg.allowed_headers),
        ] {
            if values.iter().any(|v| v == "*") {
                bail!(
                    "CORS misconfiguration: {field}=['*'] cannot be combined with \
                     allow_credentials=true; list explicit values instead"
                );
            }
        }
    }

    let mut layer = CorsLayer::new();

    if has_wildcard_origin {
        warn!("CORS is configured with allowed_origins=['*']");
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = parse_all(&cors_cfg.allowed_origins, "origin", |s| {
            HeaderValue::from_str(s).ok()
        });
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cors_cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> =
            parse_all(&cors_cfg.allowed_methods, "method", |s| s.parse().ok());
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cors_cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> =
            parse_all(&cors_cfg.allowed_headers, "header", |s| s.parse().ok());
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cors_cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    if cors_cfg.max_age_seconds > 0 {
        layer = layer.max_age(Duration::from_secs(cors_cfg.max_age_seconds));
    }

    Ok(layer)
}

fn parse_all<T>(items: &[String], kind: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| {
            let parsed = parse(item);
            if parsed.is_none() {
                warn!(kind, value = %item, "Ignoring invalid CORS entry");
            }
            parsed
        })
        .collect()
}
