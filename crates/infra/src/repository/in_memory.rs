use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use catalog_core::{Entity, ProductId};
use catalog_products::{Category, NewProduct, Product, ProductRepository, RepositoryError};

/// Products in insertion order plus an id → position index.
#[derive(Debug, Default)]
struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&idx| &self.products[idx])
    }

    fn upsert(&mut self, product: Product) {
        match self.index.get(product.id()) {
            Some(&idx) => self.products[idx] = product,
            None => {
                self.index.insert(*product.id(), self.products.len());
                self.products.push(product);
            }
        }
    }

    fn remove(&mut self, id: &ProductId) {
        let Some(idx) = self.index.remove(id) else {
            return;
        };
        self.products.remove(idx);
        // Everything after the removed slot shifted down by one.
        for (pos, p) in self.products.iter().enumerate().skip(idx) {
            self.index.insert(*p.id(), pos);
        }
    }
}

/// In-memory product repository.
///
/// Intended for tests/dev. Keeps insertion order, so `find_all` lists products
/// oldest first. Lookups by id go through a hash index.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    catalog: RwLock<Catalog>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Catalog>, RepositoryError> {
        self.catalog
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Catalog>, RepositoryError> {
        self.catalog
            .write()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let stored = Product::new(ProductId::new(), product);
        self.write()?.upsert(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.read()?.products.clone())
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .read()?
            .products
            .iter()
            .filter(|p| p.category() == category)
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, RepositoryError> {
        Ok(self.read()?.index.contains_key(&id))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.write()?.remove(&id);
        Ok(())
    }

    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        // Upsert in place so a saved product keeps its list position.
        self.write()?.upsert(product.clone());
        Ok(product)
    }
}
