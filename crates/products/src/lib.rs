//! Products domain module (static catalog + query engine).
//!
//! This crate contains the catalog store and its query semantics, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod fixture;
pub mod product;
pub mod query;

pub use catalog::Catalog;
pub use product::{NewProduct, Price, Product};
pub use query::{
    get_by_id, list_categories, query, Page, PageRequest, ProductFilter, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE,
};
