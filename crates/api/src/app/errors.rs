use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tower_http::catch_panic::CatchPanicLayer;

use storefront_core::DomainError;

use crate::app::dto::ApiResponse;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const FETCH_PRODUCTS_FAILED: &str = "An error occurred while fetching products";
pub const FETCH_CATEGORIES_FAILED: &str = "An error occurred while fetching categories";
pub const FETCH_PRODUCT_FAILED: &str = "An error occurred while fetching the product";

/// Failures surfaced to HTTP clients as `{ data: null, success: false, error }`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Product not found")]
    ProductNotFound,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ProductNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => ApiError::BadRequest(msg),
            DomainError::NotFound => ApiError::ProductNotFound,
            DomainError::InvariantViolation(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::<()>::failure(self.to_string()))).into_response()
    }
}

/// Catch handler panics and answer with a 500 envelope carrying `message`.
pub fn catch_panics(
    message: &'static str,
) -> CatchPanicLayer<impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static>
{
    CatchPanicLayer::custom(move |payload: Box<dyn Any + Send + 'static>| {
        panic_response(message, payload)
    })
}

fn panic_response(message: &'static str, payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "{message}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::failure(message)),
    )
        .into_response()
}
