use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use storefront_core::Entity;
use storefront_products::{Page, PageRequest, Product, ProductFilter};

use crate::app::errors::ApiError;

// -------------------------
// Envelope
// -------------------------

/// Uniform response wrapper: `{ data, success, error? }`.
///
/// The generic wrapper is described per payload in [`crate::app::openapi`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            error: Some(error.into()),
        }
    }
}

// -------------------------
// Request DTOs
// -------------------------

/// Raw `GET /api/products` query string.
///
/// Everything arrives as text; [`ProductsQuery::into_criteria`] validates it once.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductsQuery {
    /// Exact category label.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    #[param(value_type = Option<f64>)]
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    #[param(value_type = Option<f64>)]
    pub max_price: Option<String>,
    /// `true` selects in-stock products; any other value selects out-of-stock ones.
    #[param(value_type = Option<bool>)]
    pub in_stock: Option<String>,
    /// Case-insensitive match against name, description and category.
    pub search_term: Option<String>,
    /// 1-based page number (default 1).
    #[param(value_type = Option<u32>)]
    pub page: Option<String>,
    /// Items per page (default 10).
    #[param(value_type = Option<u32>)]
    pub page_size: Option<String>,
}

impl ProductsQuery {
    pub fn into_criteria(self) -> Result<(ProductFilter, PageRequest), ApiError> {
        let filter = ProductFilter {
            category: non_empty(self.category),
            min_price: parse_price("minPrice", self.min_price)?,
            max_price: parse_price("maxPrice", self.max_price)?,
            // Presence alone activates the flag; only the literal "true" means in stock.
            in_stock: self.in_stock.map(|v| v == "true"),
            search_term: non_empty(self.search_term),
        };

        let page = PageRequest::from_optional(
            parse_positive("page", self.page)?,
            parse_positive("pageSize", self.page_size)?,
        )?;

        Ok((filter, page))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_price(name: &str, value: Option<String>) -> Result<Option<f64>, ApiError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ApiError::bad_request(format!("{name} must be a number"))),
    }
}

fn parse_positive(name: &str, value: Option<String>) -> Result<Option<u32>, ApiError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<u32>().map(Some).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => {
            ApiError::bad_request(format!("{name} must be at most {}", u32::MAX))
        }
        _ => ApiError::bad_request(format!("{name} must be a positive integer")),
    })
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Decimal price with two fraction digits.
    pub price: f64,
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
    /// Average rating in `[0, 5]`.
    pub rating: f64,
    pub review_count: u32,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id().to_string(),
            name: p.name().to_string(),
            description: p.description().to_string(),
            price: p.price().as_decimal(),
            category: p.category().to_string(),
            image_url: p.image_url().to_string(),
            in_stock: p.in_stock(),
            rating: p.rating(),
            review_count: p.review_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageDto {
    pub items: Vec<ProductDto>,
    /// Matches across all pages.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}

impl From<Page<Product>> for ProductPageDto {
    fn from(page: Page<Product>) -> Self {
        Self {
            items: page.items.iter().map(ProductDto::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}
