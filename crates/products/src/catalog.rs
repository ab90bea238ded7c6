//! Catalog store: a fixed, ordered, read-only collection of products.

use std::collections::HashSet;

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::Product;
use crate::query::{self, Page, PageRequest, ProductFilter};

/// Immutable, ordered product collection.
///
/// Insertion order is the canonical order of every query result. A catalog is
/// built once and shared by reference (typically behind an `Arc`); nothing in this
/// crate mutates it after construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen: HashSet<&ProductId> = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id()) {
                return Err(DomainError::invariant(format!(
                    "duplicate product id: {}",
                    product.id()
                )));
            }
        }
        Ok(Self { products })
    }

    /// The built-in demo catalog.
    pub fn demo() -> DomainResult<Self> {
        crate::fixture::demo_catalog()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// See [`query::query`].
    pub fn query(&self, filter: Option<&ProductFilter>, request: PageRequest) -> Page<Product> {
        query::query(self, filter, request)
    }

    /// See [`query::get_by_id`].
    pub fn get(&self, id: &str) -> Option<&Product> {
        query::get_by_id(self, id)
    }

    /// See [`query::list_categories`].
    pub fn categories(&self) -> Vec<String> {
        query::list_categories(self)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = core::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
