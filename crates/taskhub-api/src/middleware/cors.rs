//! CORS layer built from configuration.

use std::str::FromStr;
use std::time::Duration;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use taskhub_core::config::app::CorsConfig;

/// Translates [`CorsConfig`] into a tower-http layer.
///
/// A `"*"` entry in origins or headers selects the wildcard policy;
/// unparseable entries are skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(parse_all::<Method>(&config.allowed_methods))
        .max_age(Duration::from_secs(config.max_age_seconds));

    let layer = if wildcard(&config.allowed_origins) {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(parse_all::<HeaderValue>(&config.allowed_origins))
    };

    if wildcard(&config.allowed_headers) {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(parse_all::<HeaderName>(&config.allowed_headers))
    }
}

fn wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

fn parse_all<T: FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}
