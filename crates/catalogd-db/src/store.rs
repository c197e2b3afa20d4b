use async_trait::async_trait;
use catalogd_core::{Category, Filter, NewCategory, Product};

use crate::StoreError;

/// Backing storage for the catalog.
///
/// The HTTP layer holds a `dyn CatalogStore` so handlers never depend on a
/// concrete backend. [`crate::PgStore`] is the production implementation;
/// [`crate::MemoryStore`] backs handler tests that need no database.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Verify the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    async fn connect(&self) -> Result<(), StoreError>;

    /// Release any resources held by the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if shutdown fails.
    async fn disconnect(&self) -> Result<(), StoreError>;

    /// Fetch every product with its category and variants.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query failure.
    async fn all_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Fetch a page of products matching every filter in `filters`.
    ///
    /// Filters are combined conjunctively in the order supplied. The page
    /// order is whatever the backend returns for an unordered scan. A
    /// negative `limit` or `offset` disables that bound, so `products(-1,
    /// -1, ..)` returns the full matching set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnsupportedFilter`] for a filter key the store
    /// does not recognize, or another [`StoreError`] on query failure.
    async fn products(
        &self,
        limit: i64,
        offset: i64,
        filters: &[Filter],
    ) -> Result<Vec<Product>, StoreError>;

    /// Fetch a single product by its unique code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no product has that code.
    async fn product_by_code(&self, code: &str) -> Result<Product, StoreError>;

    /// Fetch every category.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query failure.
    async fn all_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Persist a new category and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCategory`] if code or name is empty, or
    /// another [`StoreError`] on write failure.
    async fn add_category(&self, category: NewCategory) -> Result<Category, StoreError>;
}
