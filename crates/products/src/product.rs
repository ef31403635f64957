use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use catalog_core::{DomainError, Entity, ProductId};

/// Fixed set of catalog categories.
///
/// The wire form is the upper-case tag (`"ELECTRONICA"`, `"ROPA"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Electronica,
    Ropa,
    Alimentos,
    Hogar,
    Deportes,
    Juguetes,
    Libros,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electronica,
        Category::Ropa,
        Category::Alimentos,
        Category::Hogar,
        Category::Deportes,
        Category::Juguetes,
        Category::Libros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronica => "ELECTRONICA",
            Category::Ropa => "ROPA",
            Category::Alimentos => "ALIMENTOS",
            Category::Hogar => "HOGAR",
            Category::Deportes => "DEPORTES",
            Category::Juguetes => "JUGUETES",
            Category::Libros => "LIBROS",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    /// Tags are matched exactly; `"electronica"` is not a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let allowed = Category::ALL.map(|c| c.as_str()).join(", ");
                DomainError::validation(format!(
                    "unknown category '{s}' (expected one of: {allowed})"
                ))
            })
    }
}

/// Field values of a product that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: u32,
    pub category: Category,
}

/// Entity: a catalog product.
///
/// Fields are only reachable through accessors; the service is the one place
/// that mutates a stored product, and only through the narrow update methods
/// below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: Decimal,
    stock: u32,
    category: Category,
}

impl Product {
    /// Attach a repository-assigned id to a set of field values.
    pub fn new(id: ProductId, fields: NewProduct) -> Self {
        let NewProduct {
            name,
            description,
            price,
            stock,
            category,
        } = fields;
        Self {
            id,
            name,
            description,
            price,
            stock,
            category,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Replace name and description; price, stock and category are untouched.
    pub(crate) fn apply_details(&mut self, name: String, description: Option<String>) {
        self.name = name;
        self.description = description;
    }

    pub(crate) fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
