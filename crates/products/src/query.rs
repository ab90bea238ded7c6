//! Catalog query engine: filtering and pagination.
//!
//! Every call recomputes from the full catalog. Results keep catalog order; the
//! engine never re-sorts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity};

use crate::catalog::Catalog;
use crate::product::Product;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filter criteria for catalog queries.
///
/// Every field is optional; `None` imposes no constraint. Present fields are
/// combined with logical AND. An empty `category` or `search_term` counts as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound. A `NaN` bound matches nothing.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound. A `NaN` bound matches nothing.
    pub max_price: Option<f64>,
    /// Exact stock flag match.
    pub in_stock: Option<bool>,
    /// Case-insensitive substring of name, description or category.
    pub search_term: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.category().is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.in_stock.is_none()
            && self.search_term().is_none()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether `product` satisfies every present criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category() {
            if product.category() != category {
                return false;
            }
        }

        let price = product.price().as_decimal();
        if let Some(min) = self.min_price {
            if min.is_nan() || price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if max.is_nan() || price > max {
                return false;
            }
        }

        if let Some(in_stock) = self.in_stock {
            if product.in_stock() != in_stock {
                return false;
            }
        }

        if let Some(term) = self.search_term() {
            let needle = term.to_lowercase();
            let hit = product.name().to_lowercase().contains(&needle)
                || product.description().to_lowercase().contains(&needle)
                || product.category().to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Validated pagination window (1-based page, non-zero page size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> DomainResult<Self> {
        if page == 0 {
            return Err(DomainError::validation("page must be a positive integer"));
        }
        if page_size == 0 {
            return Err(DomainError::validation("pageSize must be a positive integer"));
        }
        Ok(Self { page, page_size })
    }

    /// Same as [`PageRequest::new`], filling absent values with the engine defaults.
    pub fn from_optional(page: Option<u32>, page_size: Option<u32>) -> DomainResult<Self> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based index of the first item on this page.
    pub fn offset(&self) -> usize {
        ((self.page - 1) as usize).saturating_mul(self.page_size as usize)
    }
}

/// One page of a filtered result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matches across all pages.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// An empty page with zero totals.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: request.page(),
            page_size: request.page_size(),
            total_pages: 0,
        }
    }
}

/// Filter `catalog` and cut out the requested page.
///
/// A page past the end yields no items but still reports the full `total` and
/// `total_pages`.
pub fn query(catalog: &Catalog, filter: Option<&ProductFilter>, request: PageRequest) -> Page<Product> {
    let matching: Vec<&Product> = catalog
        .iter()
        .filter(|p| filter.is_none_or(|f| f.matches(p)))
        .collect();

    let total = matching.len();
    let page_size = request.page_size() as usize;
    let total_pages = total.div_ceil(page_size);

    let start = request.offset().min(total);
    let end = start.saturating_add(page_size).min(total);
    let items = matching[start..end].iter().map(|p| (*p).clone()).collect();

    Page {
        items,
        total,
        page: request.page(),
        page_size: request.page_size(),
        total_pages,
    }
}

/// Exact id lookup. Absence is `None`, not an error.
pub fn get_by_id<'a>(catalog: &'a Catalog, id: &str) -> Option<&'a Product> {
    catalog.iter().find(|p| p.id().as_str() == id)
}

/// Distinct categories in ascending order.
pub fn list_categories(catalog: &Catalog) -> Vec<String> {
    catalog
        .iter()
        .map(|p| p.category())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{NewProduct, Price};
    use storefront_core::ProductId;

    fn demo() -> Catalog {
        Catalog::demo().unwrap()
    }

    fn ids(page: &Page<Product>) -> Vec<&str> {
        page.items.iter().map(|p| p.id().as_str()).collect()
    }

    fn page(page: u32, size: u32) -> PageRequest {
        PageRequest::new(page, size).unwrap()
    }

    #[test]
    fn no_filter_first_page() {
        let result = query(&demo(), None, PageRequest::default());
        assert_eq!(result.items.len(), 10);
        assert_eq!(result.total, 12);
        assert_eq!(result.page, 1);
        assert_eq!(result.page_size, 10);
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn second_page_holds_the_remainder() {
        let result = query(&demo(), None, page(2, 10));
        assert_eq!(ids(&result), ["11", "12"]);
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn filters_by_category() {
        let filter = ProductFilter::new().with_category("Electronics");
        let result = query(&demo(), Some(&filter), PageRequest::default());
        assert_eq!(ids(&result), ["1", "2", "6", "10"]);
        assert!(result.items.iter().all(|p| p.category() == "Electronics"));
    }

    #[test]
    fn category_match_is_exact() {
        let filter = ProductFilter::new().with_category("electronics");
        let result = query(&demo(), Some(&filter), PageRequest::default());
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn search_term_is_case_insensitive() {
        let filter = ProductFilter::new().with_search_term("wireless");
        let result = query(&demo(), Some(&filter), PageRequest::default());
        assert_eq!(ids(&result), ["1", "10"]);

        let filter = ProductFilter::new().with_search_term("WIRELESS");
        assert_eq!(query(&demo(), Some(&filter), PageRequest::default()).total, 2);
    }

    #[test]
    fn search_term_matches_description_and_category() {
        // Only in descriptions.
        let filter = ProductFilter::new().with_search_term("carafe");
        assert_eq!(ids(&query(&demo(), Some(&filter), PageRequest::default())), ["8"]);

        // Only in the category label.
        let filter = ProductFilter::new().with_search_term("kitchen");
        assert_eq!(
            ids(&query(&demo(), Some(&filter), PageRequest::default())),
            ["4", "8", "12"]
        );
    }

    #[test]
    fn empty_strings_are_unset() {
        let filter = ProductFilter::new().with_category("").with_search_term("");
        assert!(filter.is_empty());
        assert_eq!(query(&demo(), Some(&filter), PageRequest::default()).total, 12);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ProductFilter::new().with_price_range(Some(50.0), Some(100.0));
        let result = query(&demo(), Some(&filter), PageRequest::default());
        assert_eq!(ids(&result), ["6", "8", "9", "10"]);

        let exact = ProductFilter::new().with_price_range(Some(59.99), Some(59.99));
        assert_eq!(ids(&query(&demo(), Some(&exact), PageRequest::default())), ["6"]);
    }

    #[test]
    fn nan_bound_matches_nothing() {
        let filter = ProductFilter::new().with_price_range(Some(f64::NAN), None);
        assert_eq!(query(&demo(), Some(&filter), PageRequest::default()).total, 0);
    }

    #[test]
    fn filters_by_stock_flag() {
        let out = ProductFilter::new().with_in_stock(false);
        assert_eq!(ids(&query(&demo(), Some(&out), PageRequest::default())), ["3", "8"]);

        let inside = ProductFilter::new().with_in_stock(true);
        assert_eq!(query(&demo(), Some(&inside), PageRequest::default()).total, 10);
    }

    #[test]
    fn combines_filters_with_and() {
        let filter = ProductFilter::new()
            .with_category("Electronics")
            .with_in_stock(true)
            .with_price_range(None, Some(200.0));
        let result = query(&demo(), Some(&filter), PageRequest::default());
        assert_eq!(ids(&result), ["1", "6", "10"]);
    }

    #[test]
    fn page_size_five_gives_three_pages() {
        let page1 = query(&demo(), None, page(1, 5));
        let page2 = query(&demo(), None, page(2, 5));
        let page3 = query(&demo(), None, page(3, 5));
        assert_eq!(page1.items.len(), 5);
        assert_eq!(page2.items.len(), 5);
        assert_eq!(page3.items.len(), 2);
        assert_eq!(page1.total_pages, 3);
        assert_ne!(page1.items[0].id(), page2.items[0].id());
    }

    #[test]
    fn page_beyond_range_is_empty_not_an_error() {
        let result = query(&demo(), None, page(7, 10));
        assert!(result.items.is_empty());
        assert_eq!(result.total, 12);
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.page, 7);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let result = query(&demo(), None, page(u32::MAX, u32::MAX));
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn zero_page_or_size_is_rejected() {
        assert!(matches!(PageRequest::new(0, 10), Err(DomainError::Validation(_))));
        assert!(matches!(PageRequest::new(1, 0), Err(DomainError::Validation(_))));
        assert_eq!(
            PageRequest::from_optional(None, None).unwrap(),
            PageRequest::default()
        );
    }

    #[test]
    fn query_does_not_mutate_catalog() {
        let catalog = demo();
        let before = catalog.clone();
        let filter = ProductFilter::new().with_search_term("a");
        let _ = query(&catalog, Some(&filter), page(2, 3));
        assert_eq!(catalog, before);
    }

    #[test]
    fn get_by_id_finds_exact_match() {
        let catalog = demo();
        let product = get_by_id(&catalog, "1").unwrap();
        assert_eq!(product.name(), "Wireless Bluetooth Headphones");
        assert!(get_by_id(&catalog, "999").is_none());
        assert!(get_by_id(&catalog, " 1").is_none());
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        assert_eq!(
            list_categories(&demo()),
            ["Accessories", "Clothing", "Electronics", "Home & Kitchen", "Sports"]
        );
    }

    #[test]
    fn categories_ignore_catalog_order() {
        let mut products = demo().products().to_vec();
        products.reverse();
        let reversed = Catalog::new(products).unwrap();
        assert_eq!(list_categories(&reversed), list_categories(&demo()));
    }

    #[test]
    fn page_serializes_camel_case() {
        let result = query(&demo(), None, page(1, 1));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pageSize"], 1);
        assert_eq!(json["totalPages"], 12);
        assert_eq!(json["total"], 12);
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const CATEGORIES: [&str; 4] = ["Electronics", "Sports", "Clothing", "Home & Kitchen"];
        const WORDS: [&str; 5] = ["Wireless", "Lamp", "mat", "Pro", "steel"];

        fn arb_product(index: usize) -> impl Strategy<Value = Product> {
            (
                0usize..CATEGORIES.len(),
                0usize..WORDS.len(),
                0u64..50_000,
                any::<bool>(),
                0u32..=50,
            )
                .prop_map(move |(cat, word, cents, in_stock, rating_tenths)| {
                    Product::new(NewProduct {
                        id: ProductId::new(index.to_string()).unwrap(),
                        name: format!("{} {index}", WORDS[word]),
                        description: format!("A {} item", WORDS[(word + 1) % WORDS.len()]),
                        price: Price::from_cents(cents),
                        category: CATEGORIES[cat].to_string(),
                        image_url: String::new(),
                        in_stock,
                        rating: f64::from(rating_tenths) / 10.0,
                        review_count: 0,
                    })
                    .unwrap()
                })
        }

        fn arb_catalog() -> impl Strategy<Value = Catalog> {
            (0usize..40)
                .prop_flat_map(|n| (0..n).map(arb_product).collect::<Vec<_>>())
                .prop_map(|products| Catalog::new(products).unwrap())
        }

        fn arb_filter() -> impl Strategy<Value = ProductFilter> {
            (
                proptest::option::of(0usize..CATEGORIES.len()),
                proptest::option::of(0u64..50_000),
                proptest::option::of(0u64..50_000),
                proptest::option::of(any::<bool>()),
                proptest::option::of(0usize..WORDS.len()),
            )
                .prop_map(|(cat, min, max, in_stock, word)| ProductFilter {
                    category: cat.map(|c| CATEGORIES[c].to_string()),
                    min_price: min.map(|c| c as f64 / 100.0),
                    max_price: max.map(|c| c as f64 / 100.0),
                    in_stock,
                    search_term: word.map(|w| WORDS[w].to_uppercase()),
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every returned item satisfies the filter, and `total` counts all matches.
            #[test]
            fn items_satisfy_filter_and_total_counts_matches(
                catalog in arb_catalog(),
                filter in arb_filter(),
                page_no in 1u32..6,
                size in 1u32..15,
            ) {
                let result = query(&catalog, Some(&filter), PageRequest::new(page_no, size).unwrap());
                for item in &result.items {
                    prop_assert!(filter.matches(item));
                    if let Some(min) = filter.min_price {
                        prop_assert!(item.price().as_decimal() >= min);
                    }
                    if let Some(category) = &filter.category {
                        prop_assert_eq!(item.category(), category.as_str());
                    }
                }
                let expected = catalog.iter().filter(|p| filter.matches(p)).count();
                prop_assert_eq!(result.total, expected);
            }

            /// Property: page arithmetic follows ceil/min/max.
            #[test]
            fn page_lengths_follow_window_arithmetic(
                catalog in arb_catalog(),
                filter in arb_filter(),
                page_no in 1u32..10,
                size in 1u32..15,
            ) {
                let result = query(&catalog, Some(&filter), PageRequest::new(page_no, size).unwrap());
                let total = result.total;
                let size = size as usize;
                prop_assert_eq!(result.total_pages, total.div_ceil(size));
                let before = (page_no as usize - 1) * size;
                prop_assert_eq!(result.items.len(), size.min(total.saturating_sub(before)));
            }

            /// Property: concatenating all pages reproduces the filtered set in order.
            #[test]
            fn pages_partition_the_filtered_set(
                catalog in arb_catalog(),
                filter in arb_filter(),
                size in 1u32..8,
            ) {
                let first = query(&catalog, Some(&filter), PageRequest::new(1, size).unwrap());
                let mut all = Vec::new();
                for page_no in 1..=first.total_pages.max(1) {
                    let page = query(&catalog, Some(&filter), PageRequest::new(page_no as u32, size).unwrap());
                    all.extend(page.items);
                }
                let expected: Vec<Product> = catalog.iter().filter(|p| filter.matches(p)).cloned().collect();
                prop_assert_eq!(all, expected);
            }

            /// Property: identical inputs give identical results.
            #[test]
            fn query_is_deterministic(catalog in arb_catalog(), filter in arb_filter()) {
                let a = query(&catalog, Some(&filter), PageRequest::default());
                let b = query(&catalog, Some(&filter), PageRequest::default());
                prop_assert_eq!(a, b);
            }

            /// Property: categories are sorted, unique and complete.
            #[test]
            fn categories_are_sorted_unique_and_complete(catalog in arb_catalog()) {
                let categories = list_categories(&catalog);
                prop_assert!(categories.windows(2).all(|w| w[0] < w[1]));
                for product in &catalog {
                    prop_assert_eq!(
                        categories.iter().filter(|c| c.as_str() == product.category()).count(),
                        1
                    );
                }
            }

            /// Property: every catalog id is found; ids outside it are not.
            #[test]
            fn get_by_id_finds_every_member(catalog in arb_catalog()) {
                for product in &catalog {
                    prop_assert_eq!(get_by_id(&catalog, product.id().as_str()), Some(product));
                }
                prop_assert!(get_by_id(&catalog, "missing").is_none());
            }
        }
    }
}
