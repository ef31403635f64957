//! Products domain module.
//!
//! Business rules for the product catalog: the `Product` entity, the boundary
//! shapes it is created and rendered from, their validation, the repository
//! port and the `ProductService` that ties them together. No HTTP, no storage.

pub mod product;
pub mod repository;
pub mod service;
pub mod shape;
pub mod validation;

pub use product::{Category, NewProduct, Product};
pub use repository::{ProductRepository, RepositoryError};
pub use service::{ProductService, ServiceError, ServiceResult};
pub use shape::{ProductInput, ProductOutput, StockInput, ValidProductInput};
pub use validation::{Violation, Violations};
