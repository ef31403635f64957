//! Infrastructure layer: storage adapters for the product catalog.

pub mod repository;

mod integration_tests;

pub use repository::{InMemoryProductRepository, PostgresProductRepository};
