//! In-memory catalog store.
//!
//! Backs handler tests and local experiments that need no database. Filter
//! semantics mirror the Postgres store. Category code uniqueness is not
//! enforced here; the relational schema is the backstop for that.

use async_trait::async_trait;
use catalogd_core::{Category, Filter, FilterOp, NewCategory, Product};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::store::CatalogStore;
use crate::StoreError;

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    categories: Vec<Category>,
    next_category_id: i64,
}

/// [`CatalogStore`] held entirely in memory behind a `tokio` mutex.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    /// Build a store pre-populated with products and categories.
    ///
    /// Category ids assigned by [`CatalogStore::add_category`] continue after
    /// the highest id already present.
    #[must_use]
    pub fn with_data(products: Vec<Product>, categories: Vec<Category>) -> Self {
        let next_category_id = categories
            .iter()
            .map(|category| category.id)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: Mutex::new(Inner {
                products,
                categories,
                next_category_id,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn product_matches(product: &Product, filter: &Filter) -> Result<bool, StoreError> {
    match filter.key.as_str() {
        "category" => Ok(match filter.op {
            FilterOp::Equal => product.category.code == filter.value,
            FilterOp::LessThan => product.category.code.as_str() < filter.value.as_str(),
        }),
        "price" => {
            let bound =
                filter
                    .value
                    .parse::<Decimal>()
                    .map_err(|_| StoreError::InvalidFilterValue {
                        key: filter.key.clone(),
                        value: filter.value.clone(),
                    })?;
            Ok(match filter.op {
                FilterOp::Equal => product.price == bound,
                FilterOp::LessThan => product.price < bound,
            })
        }
        other => Err(StoreError::UnsupportedFilter(other.to_string())),
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn connect(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn all_products(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.products.clone())
    }

    async fn products(
        &self,
        limit: i64,
        offset: i64,
        filters: &[Filter],
    ) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.lock().await;

        let mut matched = Vec::new();
        for product in &inner.products {
            let mut keep = true;
            for filter in filters {
                if !product_matches(product, filter)? {
                    keep = false;
                    break;
                }
            }
            if keep {
                matched.push(product.clone());
            }
        }

        // A negative bound disables itself, mirroring the relational store's
        // NULL limit/offset binds.
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn product_by_code(&self, code: &str) -> Result<Product, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .products
            .iter()
            .find(|product| product.code == code)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.categories.clone())
    }

    async fn add_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        if !category.is_valid() {
            return Err(StoreError::InvalidCategory);
        }

        let mut inner = self.inner.lock().await;
        let created = Category {
            id: inner.next_category_id,
            code: category.code,
            name: category.name,
        };
        inner.next_category_id += 1;
        inner.categories.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, code: &str, name: &str) -> Category {
        Category {
            id,
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    fn product(id: i64, code: &str, price: Decimal, category: Category) -> Product {
        Product {
            id,
            code: code.to_string(),
            price,
            category,
            variants: Vec::new(),
        }
    }

    fn sample_store() -> MemoryStore {
        let drinks = category(1, "drinks", "Drinks");
        let snacks = category(2, "snacks", "Snacks");
        MemoryStore::with_data(
            vec![
                product(1, "PROD001", Decimal::new(450, 2), drinks.clone()),
                product(2, "PROD002", Decimal::new(600, 2), drinks.clone()),
                product(3, "PROD003", Decimal::new(250, 2), snacks.clone()),
            ],
            vec![drinks, snacks],
        )
    }

    #[tokio::test]
    async fn products_applies_filters_conjunctively() {
        let store = sample_store();
        let filters = [
            Filter::equal("category", "drinks"),
            Filter::less_than("price", "5"),
        ];

        let page = store.products(10, 0, &filters).await.expect("query failed");

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].code, "PROD001");
    }

    #[tokio::test]
    async fn products_pages_with_limit_and_offset() {
        let store = sample_store();

        let page = store.products(2, 1, &[]).await.expect("query failed");

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].code, "PROD002");
        assert_eq!(page[1].code, "PROD003");
    }

    #[tokio::test]
    async fn products_with_negative_bounds_returns_the_full_listing() {
        let store = sample_store();

        let all = store.products(-1, -1, &[]).await.expect("query failed");
        assert_eq!(all.len(), 3);

        let unbounded_limit = store.products(-1, 1, &[]).await.expect("query failed");
        assert_eq!(unbounded_limit.len(), 2);
    }

    #[tokio::test]
    async fn products_rejects_unknown_filter_key() {
        let store = sample_store();
        let filters = [Filter::equal("brand", "acme")];

        let err = store
            .products(10, 0, &filters)
            .await
            .expect_err("unknown key should fail");

        assert!(matches!(err, StoreError::UnsupportedFilter(key) if key == "brand"));
    }

    #[tokio::test]
    async fn products_rejects_non_numeric_price_value() {
        let store = sample_store();
        let filters = [Filter::less_than("price", "abc")];

        let err = store
            .products(10, 0, &filters)
            .await
            .expect_err("non-numeric price should fail");

        assert!(matches!(
            err,
            StoreError::InvalidFilterValue { key, value } if key == "price" && value == "abc"
        ));
    }

    #[tokio::test]
    async fn product_by_code_returns_the_matching_product() {
        let store = sample_store();

        let found = store.product_by_code("PROD002").await.expect("not found");

        assert_eq!(found.id, 2);
        assert_eq!(found.category.code, "drinks");
    }

    #[tokio::test]
    async fn product_by_code_returns_not_found_for_unknown_code() {
        let store = sample_store();

        let err = store
            .product_by_code("NOPE")
            .await
            .expect_err("unknown code should fail");

        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn add_category_assigns_ids_after_the_seeded_ones() {
        let store = sample_store();

        let created = store
            .add_category(NewCategory {
                code: "bakery".to_string(),
                name: "Bakery".to_string(),
            })
            .await
            .expect("add failed");

        assert_eq!(created.id, 3);

        let all = store.all_categories().await.expect("query failed");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn add_category_rejects_empty_code() {
        let store = MemoryStore::new();

        let err = store
            .add_category(NewCategory {
                code: String::new(),
                name: "Bakery".to_string(),
            })
            .await
            .expect_err("empty code should fail");

        assert!(matches!(err, StoreError::InvalidCategory));
    }
}
