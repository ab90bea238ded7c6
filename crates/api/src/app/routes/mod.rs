use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for all public endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/docs.json", get(crate::app::openapi::docs_json))
        .nest("/api/products", products::router())
}
