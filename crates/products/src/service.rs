//! Product lifecycle service.
//!
//! Owns the business rules around products: validation on create, existence
//! checks before every mutation, and the narrow update semantics (full update
//! touches name/description only; stock update touches stock only).

use thiserror::Error;

use catalog_core::ProductId;

use crate::product::{Category, NewProduct, Product};
use crate::repository::{ProductRepository, RepositoryError};
use crate::shape::{ProductInput, ProductOutput, ValidProductInput};
use crate::validation::Violations;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Typed failure of a service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced product does not exist. The message names the id.
    #[error("{message}")]
    NotFound { id: ProductId, message: String },

    /// Input fields broke one or more rules.
    #[error("{0}")]
    Validation(Violations),

    /// Anything else (storage failures).
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound {
            id,
            message: format!("product not found with id: {id}"),
        }
    }

    fn not_found_for_delete(id: ProductId) -> Self {
        Self::NotFound {
            id,
            message: format!("cannot delete: product not found with id: {id}"),
        }
    }
}

/// Stateless service over an injected repository.
#[derive(Debug, Clone)]
pub struct ProductService<R> {
    repository: R,
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[cfg(test)]
    pub(crate) fn repository(&self) -> &R {
        &self.repository
    }

    /// Validate `input` and store it as a new product.
    pub async fn create(&self, input: ProductInput) -> ServiceResult<Product> {
        let valid = input.validate().map_err(ServiceError::Validation)?;
        let product = self.repository.insert(self.input_to_entity(valid)).await?;
        tracing::info!(product_id = %product.id_typed(), category = %product.category(), "product created");
        Ok(product)
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Product>> {
        let products = self.repository.find_all().await?;
        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    /// Look up one product. Absence is `Ok(None)`; callers decide whether that
    /// is an error.
    pub async fn get_by_id(&self, id: ProductId) -> ServiceResult<Option<Product>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn get_by_category(&self, category: Category) -> ServiceResult<Vec<Product>> {
        let products = self.repository.find_by_category(category).await?;
        tracing::debug!(%category, count = products.len(), "listed products by category");
        Ok(products)
    }

    /// Replace name and description of an existing product.
    ///
    /// Price, stock and category in `input` are ignored; the stored values are
    /// kept.
    pub async fn update_full(&self, id: ProductId, input: ValidProductInput) -> ServiceResult<Product> {
        let mut product = self.require(id).await?;
        let ValidProductInput {
            name, description, ..
        } = input;
        product.apply_details(name, description);

        let saved = self.repository.save(product).await?;
        tracing::info!(product_id = %id, "product details updated");
        Ok(saved)
    }

    /// Set the stock of an existing product; every other field is kept.
    pub async fn update_stock(&self, id: ProductId, new_stock: u32) -> ServiceResult<Product> {
        let mut product = self.require(id).await?;
        let previous = product.stock();
        product.set_stock(new_stock);

        let saved = self.repository.save(product).await?;
        tracing::info!(product_id = %id, previous, new_stock, "product stock updated");
        Ok(saved)
    }

    /// Remove an existing product. Existence is checked first; deleting an
    /// unknown id is `NotFound`.
    pub async fn delete(&self, id: ProductId) -> ServiceResult<()> {
        if !self.repository.exists_by_id(id).await? {
            tracing::warn!(product_id = %id, "delete of unknown product");
            return Err(ServiceError::not_found_for_delete(id));
        }
        self.repository.delete_by_id(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    pub fn entity_to_output(&self, product: &Product) -> ProductOutput {
        ProductOutput::from(product)
    }

    pub fn input_to_entity(&self, input: ValidProductInput) -> NewProduct {
        NewProduct::from(input)
    }

    async fn require(&self, id: ProductId) -> ServiceResult<Product> {
        match self.repository.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => {
                tracing::warn!(product_id = %id, "product not found");
                Err(ServiceError::not_found(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    /// Repository double that records which port methods were called.
    #[derive(Default)]
    struct RecordingRepository {
        products: Mutex<Vec<Product>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingRepository {
        fn with(products: Vec<Product>) -> Self {
            Self {
                products: Mutex::new(products),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductRepository for RecordingRepository {
        async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
            self.record("insert");
            let product = Product::new(ProductId::new(), product);
            self.products.lock().unwrap().push(product.clone());
            Ok(product)
        }

        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
            self.record("find_by_id");
            Ok(self.products.lock().unwrap().iter().find(|p| p.id_typed() == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            self.record("find_all");
            Ok(self.products.lock().unwrap().clone())
        }

        async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, RepositoryError> {
            self.record("find_by_category");
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.category() == category)
                .cloned()
                .collect())
        }

        async fn exists_by_id(&self, id: ProductId) -> Result<bool, RepositoryError> {
            self.record("exists_by_id");
            Ok(self.products.lock().unwrap().iter().any(|p| p.id_typed() == id))
        }

        async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
            self.record("delete_by_id");
            self.products.lock().unwrap().retain(|p| p.id_typed() != id);
            Ok(())
        }

        async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
            self.record("save");
            let mut products = self.products.lock().unwrap();
            match products.iter().position(|p| p.id_typed() == product.id_typed()) {
                Some(idx) => products[idx] = product.clone(),
                None => products.push(product.clone()),
            }
            Ok(product)
        }
    }

    /// Repository whose every call fails, to prove which paths never reach it.
    struct FailingRepository;

    #[async_trait]
    impl ProductRepository for FailingRepository {
        async fn insert(&self, _product: NewProduct) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Storage("down".to_string()))
        }

        async fn find_by_id(&self, _id: ProductId) -> Result<Option<Product>, RepositoryError> {
            Err(RepositoryError::Storage("down".to_string()))
        }

        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            Err(RepositoryError::Storage("down".to_string()))
        }

        async fn find_by_category(&self, _category: Category) -> Result<Vec<Product>, RepositoryError> {
            Err(RepositoryError::Storage("down".to_string()))
        }

        async fn exists_by_id(&self, _id: ProductId) -> Result<bool, RepositoryError> {
            Err(RepositoryError::Storage("down".to_string()))
        }

        async fn delete_by_id(&self, _id: ProductId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Storage("down".to_string()))
        }

        async fn save(&self, _product: Product) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Storage("down".to_string()))
        }
    }

    fn keyboard() -> NewProduct {
        NewProduct {
            name: "Teclado Mecánico".to_string(),
            description: None,
            price: Decimal::new(15099, 2),
            stock: 50,
            category: Category::Electronica,
        }
    }

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: Some(name.to_string()),
            description: Some("nueva descripción".to_string()),
            price: Some(Decimal::new(999, 2)),
            stock: Some(3),
            category: Some(Category::Hogar),
        }
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_the_repository() {
        let service = ProductService::new(FailingRepository);

        let err = service.create(ProductInput::default()).await.unwrap_err();
        match err {
            ServiceError::Validation(v) => {
                assert!(v.has("name"));
                assert!(v.has("category"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_inserts_once_and_returns_assigned_product() {
        let service = ProductService::new(RecordingRepository::default());

        let created = service.create(input("Lámpara")).await.unwrap();
        assert_eq!(created.name(), "Lámpara");
        assert_eq!(created.category(), Category::Hogar);
        assert_eq!(service.repository().calls(), vec!["insert"]);
    }

    #[tokio::test]
    async fn delete_checks_existence_before_deleting() {
        let service = ProductService::new(RecordingRepository::default());
        let id = ProductId::new();

        let err = service.delete(id).await.unwrap_err();
        match err {
            ServiceError::NotFound { id: missing, message } => {
                assert_eq!(missing, id);
                assert_eq!(message, format!("cannot delete: product not found with id: {id}"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(service.repository().calls(), vec!["exists_by_id"]);
    }

    #[tokio::test]
    async fn update_full_keeps_price_stock_and_category() {
        let existing = Product::new(ProductId::new(), keyboard());
        let id = existing.id_typed();
        let service = ProductService::new(RecordingRepository::with(vec![existing]));

        let valid = input("Teclado Inalámbrico").validate().unwrap();
        let updated = service.update_full(id, valid).await.unwrap();

        assert_eq!(updated.id_typed(), id);
        assert_eq!(updated.name(), "Teclado Inalámbrico");
        assert_eq!(updated.description(), Some("nueva descripción"));
        assert_eq!(updated.price(), Decimal::new(15099, 2));
        assert_eq!(updated.stock(), 50);
        assert_eq!(updated.category(), Category::Electronica);
        assert_eq!(service.repository().calls(), vec!["find_by_id", "save"]);
    }

    #[tokio::test]
    async fn update_stock_on_unknown_id_is_not_found_and_never_saves() {
        let service = ProductService::new(RecordingRepository::default());
        let id = ProductId::new();

        let err = service.update_stock(id, 10).await.unwrap_err();
        assert_eq!(err.to_string(), format!("product not found with id: {id}"));
        assert_eq!(service.repository().calls(), vec!["find_by_id"]);
    }

    #[tokio::test]
    async fn storage_failures_surface_as_repository_errors() {
        let service = ProductService::new(FailingRepository);

        assert!(matches!(service.get_all().await, Err(ServiceError::Repository(_))));
        assert!(matches!(
            service.get_by_id(ProductId::new()).await,
            Err(ServiceError::Repository(_))
        ));
        assert!(matches!(
            service.delete(ProductId::new()).await,
            Err(ServiceError::Repository(_))
        ));
    }

    #[test]
    fn conversions_are_structural() {
        let service = ProductService::new(FailingRepository);

        let new_product = service.input_to_entity(input("Sartén").validate().unwrap());
        assert_eq!(new_product.name, "Sartén");
        assert_eq!(new_product.price, Decimal::new(999, 2));
        assert_eq!(new_product.stock, 3);

        let product = Product::new(ProductId::new(), new_product);
        let output = service.entity_to_output(&product);
        assert_eq!(output.id, product.id_typed());
        assert_eq!(output.name, "Sartén");
        assert_eq!(output.description.as_deref(), Some("nueva descripción"));
        assert_eq!(output.category, Category::Hogar);
    }
}
