//! Boundary shapes: how products enter and leave the service.
//!
//! These are plain serde structs. Input shapes keep every field optional so a
//! missing value becomes a validation violation instead of a parse error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use catalog_core::ProductId;

use crate::product::{Category, NewProduct, Product};

/// Body of create and full-update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductInput {
    /// 3 to 100 characters, not blank.
    #[schema(example = "Teclado Mecánico")]
    pub name: Option<String>,
    /// At most 500 characters.
    #[schema(example = "Teclado con switches Cherry MX Red")]
    pub description: Option<String>,
    /// At least 0.01.
    #[schema(value_type = Option<f64>, example = 150.99)]
    pub price: Option<Decimal>,
    /// Not negative.
    #[schema(example = 50)]
    pub stock: Option<i64>,
    pub category: Option<Category>,
}

/// Body of the stock-update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StockInput {
    #[schema(example = 25)]
    pub stock: Option<i64>,
}

/// A `ProductInput` that passed validation. Only `ProductInput::validate`
/// produces one outside of this crate's tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProductInput {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) price: Decimal,
    pub(crate) stock: u32,
    pub(crate) category: Category,
}

impl ValidProductInput {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl From<ValidProductInput> for NewProduct {
    fn from(input: ValidProductInput) -> Self {
        NewProduct {
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category: input.category,
        }
    }
}

/// Rendered product: id plus every field. Price goes out as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductOutput {
    #[schema(value_type = String, example = "01929f3e-7c1a-7d4e-9b2a-5f0c3d8e1a24")]
    pub id: ProductId,
    #[schema(example = "Teclado Mecánico")]
    pub name: String,
    #[schema(example = "Teclado con switches Cherry MX Red")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 150.99)]
    pub price: Decimal,
    #[schema(example = 50)]
    pub stock: u32,
    pub category: Category,
}

impl From<&Product> for ProductOutput {
    fn from(p: &Product) -> Self {
        ProductOutput {
            id: p.id_typed(),
            name: p.name().to_string(),
            description: p.description().map(str::to_string),
            price: p.price(),
            stock: p.stock(),
            category: p.category(),
        }
    }
}
