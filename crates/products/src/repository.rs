//! Persistence port for products.
//!
//! The service only ever talks to this trait. Adapters (in-memory, Postgres)
//! live in `catalog-infra`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;

use crate::product::{Category, NewProduct, Product};

/// Repository operation error.
///
/// These are **infrastructure errors** (storage unavailable, unreadable rows).
/// A missing record is not an error at this layer; lookups return `Option`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),

    #[error("corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Product persistence.
///
/// Implementations decide ordering of `find_all`/`find_by_category`; the
/// in-memory adapter keeps insertion order. Concurrent writes to the same id
/// are last-write-wins.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product and assign its id.
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, RepositoryError>;

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, RepositoryError>;

    /// Remove a product. Removing an absent id is a no-op.
    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Upsert by the product's existing id.
    async fn save(&self, product: Product) -> Result<Product, RepositoryError>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        (**self).insert(product).await
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_all().await
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_by_category(category).await
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, RepositoryError> {
        (**self).exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        (**self).delete_by_id(id).await
    }

    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        (**self).save(product).await
    }
}
