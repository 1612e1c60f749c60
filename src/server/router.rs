//! Router layers: tracing, CORS, body limit and error details

use super::middleware::attach_error_details;
use crate::config::AppConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// CORS policy from the configured origins
///
/// `*` allows any origin; an empty list adds no CORS headers.
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }
    if origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Wrap `app` with the layers every route gets
pub fn apply_layers(app: Router, config: &AppConfig) -> Router {
    let app = app
        .layer(DefaultBodyLimit::max(config.files.max_upload_bytes))
        .layer(middleware::from_fn(attach_error_details));

    let app = match cors_layer(&config.server.cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
}
