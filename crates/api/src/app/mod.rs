//! HTTP API application wiring (Axum router + middleware).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query parsing, response envelope and JSON mapping
//! - `errors.rs`: consistent error envelopes
//! - `openapi.rs`: generated API document

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use storefront_products::Catalog;

use crate::config::{CorsConfig, ServerConfig};

pub mod dto;
pub mod errors;
pub mod openapi;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The catalog is injected so tests can serve any fixture.
pub fn build_app(catalog: Arc<Catalog>, config: &ServerConfig) -> Router {
    let routes = routes::router().layer(Extension(catalog));
    with_middleware(routes, &config.cors)
}

/// Wrap `router` in the shared stack: request tracing, panic-to-500 and CORS.
pub fn with_middleware(router: Router, cors: &CorsConfig) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(cors))
            .layer(errors::catch_panics(errors::UNEXPECTED_ERROR)),
    )
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(Duration::from_secs(600));

    if config.allows_any_origin() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    tracing::info!(origins = ?config.allowed_origins, "CORS configured");
    base.allow_origin(AllowOrigin::list(origins))
}
