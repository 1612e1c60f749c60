//! REST exposure
//!
//! Consumes a [`ServerHost`] and produces an Axum `Router`. Health and
//! authentication routes are public; everything else sits behind the bearer
//! middleware when security is enabled.

use super::super::host::ServerHost;
use super::super::router::apply_layers;
use crate::auth::handlers::{self as auth_handlers, AuthAppState};
use crate::auth::middleware::require_bearer;
use crate::files::handlers::{self as file_handlers, FilesAppState};
use anyhow::Result;
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Authentication routes
    /// - Person and books routes
    /// - File routes
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let auth_routes = auth_handlers::routes(AuthAppState {
            service: host.auth.clone(),
        });
        let file_routes = file_handlers::routes(FilesAppState {
            storage: host.files.clone(),
            links: host.links.clone(),
        });

        let mut protected = host.entity_registry.build_routes().merge(file_routes);
        for custom_router in custom_routes {
            protected = protected.merge(custom_router);
        }

        if host.security_enabled() {
            protected = protected.layer(middleware::from_fn_with_state(
                host.tokens.clone(),
                require_bearer,
            ));
        } else {
            tracing::warn!("Security disabled: every route is public");
        }

        let app = Self::health_routes().merge(auth_routes).merge(protected);
        Ok(apply_layers(app, &host.config))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "bookstore"
        }))
    }
}
