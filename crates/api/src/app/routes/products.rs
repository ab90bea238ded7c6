use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    routing::get,
    Json, Router,
};

use storefront_core::DomainError;
use storefront_products::Catalog;

use crate::app::dto::{ApiResponse, ProductDto, ProductPageDto, ProductsQuery};
use crate::app::errors::{
    catch_panics, ApiError, FETCH_CATEGORIES_FAILED, FETCH_PRODUCTS_FAILED, FETCH_PRODUCT_FAILED,
};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_products).layer(catch_panics(FETCH_PRODUCTS_FAILED)),
        )
        .route(
            "/categories",
            get(list_categories).layer(catch_panics(FETCH_CATEGORIES_FAILED)),
        )
        .route(
            "/:id",
            get(get_product).layer(catch_panics(FETCH_PRODUCT_FAILED)),
        )
}

/// Filtered, paginated product listing.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ProductsQuery),
    responses(
        (status = 200, description = "One page of matching products", body = crate::app::openapi::ProductPageResponse),
        (status = 400, description = "Malformed query parameter", body = crate::app::openapi::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::app::openapi::ErrorResponse),
    )
)]
pub async fn list_products(
    Extension(catalog): Extension<Arc<Catalog>>,
    query: Result<Query<ProductsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ProductPageDto>>, ApiError> {
    let Query(params) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let (filter, page) = params.into_criteria().inspect_err(|e| {
        tracing::warn!(error = %e, "rejected product query");
    })?;

    let result = catalog.query(Some(&filter), page);
    tracing::debug!(
        category = ?filter.category,
        min_price = ?filter.min_price,
        max_price = ?filter.max_price,
        in_stock = ?filter.in_stock,
        search_term = ?filter.search_term,
        page = page.page(),
        page_size = page.page_size(),
        total = result.total,
        "product query"
    );

    Ok(Json(ApiResponse::ok(ProductPageDto::from(result))))
}

/// Distinct category labels, sorted ascending.
#[utoipa::path(
    get,
    path = "/api/products/categories",
    tag = "Products",
    responses(
        (status = 200, description = "All categories", body = crate::app::openapi::CategoriesResponse),
        (status = 500, description = "Unexpected failure", body = crate::app::openapi::ErrorResponse),
    )
)]
pub async fn list_categories(
    Extension(catalog): Extension<Arc<Catalog>>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(catalog.categories()))
}

/// Single product by id.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "The product", body = crate::app::openapi::ProductResponse),
        (status = 404, description = "No product with this id", body = crate::app::openapi::ErrorResponse),
        (status = 500, description = "Unexpected failure", body = crate::app::openapi::ErrorResponse),
    )
)]
pub async fn get_product(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let product = catalog
        .get(&id)
        .ok_or_else(DomainError::not_found)
        .inspect_err(|_| tracing::debug!(%id, "product not found"))?;

    Ok(Json(ApiResponse::ok(ProductDto::from(product))))
}
