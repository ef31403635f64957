use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use catalog_infra::{InMemoryProductRepository, PostgresProductRepository};
use catalog_products::{ProductRepository, ProductService};

/// The product service as wired into the HTTP layer.
pub type CatalogService = ProductService<Arc<dyn ProductRepository>>;

/// Everything handlers need, built once at startup and shared via `Extension`.
#[derive(Clone)]
pub struct AppServices {
    products: CatalogService,
}

impl AppServices {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductService::new(repository),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRepository::new()))
    }

    /// Postgres wiring: connect, make sure the schema exists, then build.
    pub async fn persistent(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("failed to connect to Postgres")?;

        let repository = PostgresProductRepository::new(pool);
        repository
            .migrate()
            .await
            .context("failed to prepare products schema")?;

        Ok(Self::new(Arc::new(repository)))
    }

    pub fn products(&self) -> &CatalogService {
        &self.products
    }
}
