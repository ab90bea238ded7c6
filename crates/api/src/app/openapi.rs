//! OpenAPI document for the catalog API.

use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::app::dto::{ProductDto, ProductPageDto};

// Concrete shapes of `ApiResponse<T>` per route, for documentation only.

/// `{ data: ProductPage, success: true }`
#[derive(Serialize, ToSchema)]
pub struct ProductPageResponse {
    pub data: Option<ProductPageDto>,
    pub success: bool,
}

/// `{ data: Product, success: true }`
#[derive(Serialize, ToSchema)]
pub struct ProductResponse {
    pub data: Option<ProductDto>,
    pub success: bool,
}

/// `{ data: string[], success: true }`
#[derive(Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub data: Option<Vec<String>>,
    pub success: bool,
}

/// `{ data: null, success: false, error }`
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `null`.
    pub data: Option<String>,
    pub success: bool,
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Read-only product catalog: filtering, pagination, lookup by id and categories."
    ),
    paths(
        crate::app::routes::products::list_products,
        crate::app::routes::products::list_categories,
        crate::app::routes::products::get_product,
    ),
    components(
        schemas(
            ProductDto,
            ProductPageDto,
            ProductPageResponse,
            ProductResponse,
            CategoriesResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Products", description = "Catalog queries"),
    ),
)]
pub struct ApiDoc;

/// `GET /docs.json`
pub async fn docs_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
