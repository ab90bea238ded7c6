//! Typed client for the storefront API.
//!
//! - `client.rs`: HTTP calls + envelope decoding
//! - `types.rs`: wire envelope
//! - `state.rs`: `{ loading, error, data }` state and dependency-tracking views

pub mod client;
pub mod state;
pub mod types;

pub use client::{CatalogClient, ClientError, DEFAULT_API_URL, DEFAULT_CLIENT_PAGE_SIZE};
pub use state::{CategoriesView, FetchState, ProductListView, ProductListing, ProductView};
pub use types::Envelope;
