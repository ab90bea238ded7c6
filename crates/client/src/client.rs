use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

use storefront_products::{Page, Product, ProductFilter};

use crate::types::Envelope;

pub const DEFAULT_API_URL: &str = "http://localhost:3333/api";

/// Page size used by listing views when the caller has no preference.
pub const DEFAULT_CLIENT_PAGE_SIZE: u32 = 12;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with `success: false` (or no data).
    #[error("{0}")]
    Api(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

/// Thin async wrapper over the catalog routes.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl CatalogClient {
    /// `base_url` points at the API prefix, e.g. `http://localhost:3333/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /products` with the filter encoded the same way the storefront UI does.
    pub async fn products(
        &self,
        filter: Option<&ProductFilter>,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Product>, ClientError> {
        let url = self.endpoint(&["products"])?;
        let params = products_query(filter, page, page_size);
        tracing::debug!(%url, ?params, "fetching products");

        let response = self.http.get(url).query(&params).send().await?;
        decode(response, "Failed to load products").await
    }

    /// `GET /products/{id}`.
    pub async fn product(&self, id: &str) -> Result<Product, ClientError> {
        let url = self.endpoint(&["products", id])?;
        let response = self.http.get(url).send().await?;
        decode(response, "Failed to load product").await
    }

    /// `GET /products/categories`.
    pub async fn categories(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["products", "categories"])?;
        let response = self.http.get(url).send().await?;
        decode(response, "Failed to load categories").await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Query pairs for a listing request: `page`, `pageSize`, then every present filter field.
pub fn products_query(
    filter: Option<&ProductFilter>,
    page: u32,
    page_size: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("page", page.to_string()), ("pageSize", page_size.to_string())];

    if let Some(filter) = filter {
        if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(("category", category.to_string()));
        }
        if let Some(min) = filter.min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = filter.max_price {
            params.push(("maxPrice", max.to_string()));
        }
        if let Some(in_stock) = filter.in_stock {
            params.push(("inStock", in_stock.to_string()));
        }
        if let Some(term) = filter.search_term.as_deref().filter(|t| !t.is_empty()) {
            params.push(("searchTerm", term.to_string()));
        }
    }

    params
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ClientError> {
    let envelope: Envelope<T> = response.json().await?;
    envelope.into_result(fallback).map_err(ClientError::Api)
}
