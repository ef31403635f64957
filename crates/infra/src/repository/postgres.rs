//! Postgres-backed product repository.
//!
//! Maps `Product` onto a single `products` table. The schema is created by
//! `migrate()`, which is idempotent and run once at startup.
//!
//! ## Ordering
//!
//! `find_all` and `find_by_category` order by `created_at, id`, which matches
//! insertion order for rows written through this adapter.
//!
//! ## Concurrency
//!
//! `save` is a single `INSERT .. ON CONFLICT DO UPDATE`; concurrent writers to
//! the same id are last-write-wins.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use catalog_core::ProductId;
use catalog_products::{Category, NewProduct, Product, ProductRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NULL,
    price       NUMERIC NOT NULL,
    stock       BIGINT NOT NULL,
    category    TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS products_category_idx ON products (category);
"#;

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, stock, category FROM products";

pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductRepository {
    /// Create a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `products` table and its index if they do not exist.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(storage)?;
        tracing::info!("products schema ready");
        Ok(())
    }
}

impl core::fmt::Debug for PostgresProductRepository {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostgresProductRepository").finish_non_exhaustive()
    }
}

fn storage(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Raw column values of one `products` row, before domain checks.
#[derive(Debug, Clone)]
struct ProductRow {
    id: uuid::Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: i64,
    category: String,
}

impl ProductRow {
    fn from_pg(row: &PgRow) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: row.try_get("id").map_err(storage)?,
            name: row.try_get("name").map_err(storage)?,
            description: row.try_get("description").map_err(storage)?,
            price: row.try_get("price").map_err(storage)?,
            stock: row.try_get("stock").map_err(storage)?,
            category: row.try_get("category").map_err(storage)?,
        })
    }

    /// Rows this adapter did not write can hold values `Product` cannot
    /// represent; those surface as `RepositoryError::Corrupt`.
    fn into_product(self) -> Result<Product, RepositoryError> {
        let id = self.id;
        let corrupt = |reason: String| RepositoryError::Corrupt {
            id: id.to_string(),
            reason,
        };

        let stock = u32::try_from(self.stock)
            .map_err(|_| corrupt(format!("stock out of range: {}", self.stock)))?;
        let category: Category = self.category.parse().map_err(|e| corrupt(format!("{e}")))?;

        Ok(Product::new(
            ProductId::from_uuid(id),
            NewProduct {
                name: self.name,
                description: self.description,
                price: self.price,
                stock,
                category,
            },
        ))
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, RepositoryError> {
    ProductRow::from_pg(row)?.into_product()
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let product = Product::new(ProductId::new(), product);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id_typed().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price())
        .bind(i64::from(product.stock()))
        .bind(product.category().as_str())
        .execute(&*self.pool)
        .await
        .map_err(storage)?;

        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(storage)?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY created_at, id"))
            .fetch_all(&*self.pool)
            .await
            .map_err(storage)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE category = $1 ORDER BY created_at, id"
        ))
        .bind(category.as_str())
        .fetch_all(&*self.pool)
        .await
        .map_err(storage)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1) AS present")
            .bind(id.as_uuid())
            .fetch_one(&*self.pool)
            .await
            .map_err(storage)?;

        row.try_get::<bool, _>("present").map_err(storage)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                stock = EXCLUDED.stock,
                category = EXCLUDED.category
            "#,
        )
        .bind(product.id_typed().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price())
        .bind(i64::from(product.stock()))
        .bind(product.category().as_str())
        .execute(&*self.pool)
        .await
        .map_err(storage)?;

        Ok(product)
    }
}
