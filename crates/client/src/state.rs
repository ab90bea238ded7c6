//! Client-side fetch state.
//!
//! Each view remembers the inputs of its last fetch and only goes back to the
//! server when they change (or on an explicit `refresh`). There are no automatic
//! retries. State updates are published on a `watch` channel so other tasks can
//! observe `loading` while a request is in flight.

use tokio::sync::watch;

use storefront_products::{Product, ProductFilter};

use crate::client::{CatalogClient, ClientError};

/// `{ loading, error, data }` for one remote resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: T,
}

/// What a listing view shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub total_products: usize,
    pub total_pages: usize,
}

/// Shared state cell behind every view.
#[derive(Debug)]
struct Resource<T> {
    tx: watch::Sender<FetchState<T>>,
}

impl<T: Clone + Default> Resource<T> {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(FetchState::default());
        Self { tx }
    }

    fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.tx.subscribe()
    }

    fn snapshot(&self) -> FetchState<T> {
        self.tx.borrow().clone()
    }

    fn start(&self) {
        self.tx.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn complete(&self, result: Result<T, ClientError>, what: &str) {
        match result {
            Ok(data) => self.tx.send_modify(|state| {
                state.data = data;
                state.loading = false;
            }),
            Err(err) => {
                tracing::warn!(error = %err, "error loading {what}");
                self.tx.send_modify(|state| {
                    state.data = T::default();
                    state.error = Some(err.to_string());
                    state.loading = false;
                });
            }
        }
    }

    fn clear_data(&self) {
        self.tx.send_modify(|state| state.data = T::default());
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ListKey {
    filter: Option<ProductFilter>,
    page: u32,
    page_size: u32,
}

/// Paginated, filtered product listing.
#[derive(Debug)]
pub struct ProductListView {
    key: Option<ListKey>,
    resource: Resource<ProductListing>,
}

impl Default for ProductListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListView {
    pub fn new() -> Self {
        Self {
            key: None,
            resource: Resource::new(),
        }
    }

    pub fn state(&self) -> FetchState<ProductListing> {
        self.resource.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<ProductListing>> {
        self.resource.subscribe()
    }

    /// Fetch if `filter`, `page` or `page_size` differ from the last fetch.
    ///
    /// Returns whether a request was made.
    pub async fn sync(
        &mut self,
        client: &CatalogClient,
        filter: Option<&ProductFilter>,
        page: u32,
        page_size: u32,
    ) -> bool {
        let key = ListKey {
            filter: filter.cloned(),
            page,
            page_size,
        };
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.key = Some(key);
        self.load(client).await;
        true
    }

    /// Re-run the last fetch ("try again"). No-op before the first `sync`.
    pub async fn refresh(&mut self, client: &CatalogClient) {
        if self.key.is_some() {
            self.load(client).await;
        }
    }

    async fn load(&mut self, client: &CatalogClient) {
        let Some(key) = self.key.as_ref() else {
            return;
        };
        self.resource.start();
        let result = client
            .products(key.filter.as_ref(), key.page, key.page_size)
            .await
            .map(|page| ProductListing {
                products: page.items,
                total_products: page.total,
                total_pages: page.total_pages,
            });
        self.resource.complete(result, "products");
    }
}

/// A single product, addressed by an optional id.
#[derive(Debug)]
pub struct ProductView {
    id: Option<Option<String>>,
    resource: Resource<Option<Product>>,
}

impl Default for ProductView {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductView {
    pub fn new() -> Self {
        Self {
            id: None,
            resource: Resource::new(),
        }
    }

    pub fn state(&self) -> FetchState<Option<Product>> {
        self.resource.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<Option<Product>>> {
        self.resource.subscribe()
    }

    /// Fetch when `id` changed. A missing or empty id clears the product
    /// without a request.
    pub async fn sync(&mut self, client: &CatalogClient, id: Option<&str>) -> bool {
        let key = id.filter(|id| !id.is_empty()).map(str::to_string);
        if self.id.as_ref() == Some(&key) {
            return false;
        }
        self.id = Some(key);
        self.load(client).await
    }

    pub async fn refresh(&mut self, client: &CatalogClient) {
        self.load(client).await;
    }

    async fn load(&mut self, client: &CatalogClient) -> bool {
        let Some(Some(id)) = self.id.as_ref() else {
            self.resource.clear_data();
            return false;
        };
        self.resource.start();
        let result = client.product(id).await.map(Some);
        self.resource.complete(result, "product");
        true
    }
}

/// Category list, fetched once and on `refresh`.
#[derive(Debug)]
pub struct CategoriesView {
    loaded: bool,
    resource: Resource<Vec<String>>,
}

impl Default for CategoriesView {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoriesView {
    pub fn new() -> Self {
        Self {
            loaded: false,
            resource: Resource::new(),
        }
    }

    pub fn state(&self) -> FetchState<Vec<String>> {
        self.resource.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<Vec<String>>> {
        self.resource.subscribe()
    }

    pub async fn sync(&mut self, client: &CatalogClient) -> bool {
        if self.loaded {
            return false;
        }
        self.refresh(client).await;
        true
    }

    pub async fn refresh(&mut self, client: &CatalogClient) {
        self.loaded = true;
        self.resource.start();
        let result = client.categories().await;
        self.resource.complete(result, "categories");
    }
}
