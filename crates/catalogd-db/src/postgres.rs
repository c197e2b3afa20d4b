//! Postgres-backed catalog store.

use std::collections::HashMap;

use async_trait::async_trait;
use catalogd_core::{Category, Filter, NewCategory, Product, Variant};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::store::CatalogStore;
use crate::StoreError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A product row joined with its category.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    code: String,
    price: Decimal,
    category_id: i64,
    category_code: String,
    category_name: String,
}

/// A row from the `product_variants` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct VariantRow {
    id: i64,
    product_id: i64,
    name: String,
    sku: String,
    /// `NULL` means the variant inherits the product price.
    price: Option<Decimal>,
}

/// A row from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    code: String,
    name: String,
}

// ---------------------------------------------------------------------------
// SQL assembly
// ---------------------------------------------------------------------------

const PRODUCT_SELECT: &str =
    "SELECT p.id, p.code, p.price, \
            c.id AS category_id, c.code AS category_code, c.name AS category_name \
     FROM products p \
     JOIN categories c ON c.id = p.category_id";

/// Build the paged product query for a set of filters.
///
/// Filter clauses are appended in the order supplied and joined with `AND`.
/// Filter values bind as `TEXT`; the price clause casts the bound value so
/// the database engine performs the numeric coercion. No `ORDER BY` is
/// applied, so the page order is whatever the storage scan returns.
fn products_page_sql(filters: &[Filter]) -> Result<String, StoreError> {
    let mut clauses = Vec::with_capacity(filters.len());
    for (position, filter) in filters.iter().enumerate() {
        let (column, cast) = match filter.key.as_str() {
            "category" => ("c.code", ""),
            // Plain ::numeric keeps the bound exact; a scaled cast would
            // round the client's value before the comparison.
            "price" => ("p.price", "::numeric"),
            other => return Err(StoreError::UnsupportedFilter(other.to_string())),
        };
        let placeholder = position + 1;
        clauses.push(format!("{column} {} ${placeholder}{cast}", filter.op));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let limit_placeholder = filters.len() + 1;
    let offset_placeholder = filters.len() + 2;
    Ok(format!(
        "{PRODUCT_SELECT}{where_clause} LIMIT ${limit_placeholder} OFFSET ${offset_placeholder}"
    ))
}

fn product_from_row(row: ProductRow, variants: &mut HashMap<i64, Vec<Variant>>) -> Product {
    Product {
        id: row.id,
        code: row.code,
        price: row.price,
        category: Category {
            id: row.category_id,
            code: row.category_code,
            name: row.category_name,
        },
        variants: variants.remove(&row.id).unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Store implementation
// ---------------------------------------------------------------------------

/// [`CatalogStore`] backed by a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch variants for a batch of product ids, grouped by product.
    async fn variants_by_product(
        &self,
        product_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Variant>>, StoreError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, VariantRow>(
            "SELECT id, product_id, name, sku, price \
             FROM product_variants \
             WHERE product_id = ANY($1::bigint[]) \
             ORDER BY product_id, id",
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut map: HashMap<i64, Vec<Variant>> = HashMap::new();
        for row in rows {
            map.entry(row.product_id).or_default().push(Variant {
                id: row.id,
                product_id: row.product_id,
                name: row.name,
                sku: row.sku,
                price: row.price,
            });
        }
        Ok(map)
    }

    /// Attach variants to a page of product rows in one batched query.
    async fn attach_variants(&self, rows: Vec<ProductRow>) -> Result<Vec<Product>, StoreError> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut variants = self.variants_by_product(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| product_from_row(row, &mut variants))
            .collect())
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn connect(&self) -> Result<(), StoreError> {
        crate::ping(&self.pool).await?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }

    async fn all_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(PRODUCT_SELECT)
            .fetch_all(&self.pool)
            .await?;
        self.attach_variants(rows).await
    }

    async fn products(
        &self,
        limit: i64,
        offset: i64,
        filters: &[Filter],
    ) -> Result<Vec<Product>, StoreError> {
        let sql = products_page_sql(filters)?;

        let mut query = sqlx::query_as::<_, ProductRow>(&sql);
        for filter in filters {
            query = query.bind(&filter.value);
        }
        // Negative bounds bind as NULL; LIMIT NULL / OFFSET NULL disable the
        // clause in Postgres, so the full matching set comes back.
        let rows = query
            .bind((limit >= 0).then_some(limit))
            .bind((offset >= 0).then_some(offset))
            .fetch_all(&self.pool)
            .await?;

        self.attach_variants(rows).await
    }

    async fn product_by_code(&self, code: &str) -> Result<Product, StoreError> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.code = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut variants = self.variants_by_product(&[row.id]).await?;
        Ok(product_from_row(row, &mut variants))
    }

    async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, code, name FROM categories")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.id,
                code: row.code,
                name: row.name,
            })
            .collect())
    }

    async fn add_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        if !category.is_valid() {
            return Err(StoreError::InvalidCategory);
        }

        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (code, name) \
             VALUES ($1, $2) \
             RETURNING id, code, name",
        )
        .bind(&category.code)
        .bind(&category.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Category {
            id: row.id,
            code: row.code,
            name: row.name,
        })
    }
}
