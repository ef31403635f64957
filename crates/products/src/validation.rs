//! Field-level validation of the boundary shapes.
//!
//! Each input shape has one `validate` function that checks every field and
//! collects *all* violations, in field declaration order, before giving up.

use rust_decimal::Decimal;

use crate::shape::{ProductInput, StockInput, ValidProductInput};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Smallest accepted price (0.01).
pub const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// One failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub reason: &'static str,
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every violation found in one input.
///
/// Displays as `field: reason, field: reason`, which is the message the HTTP
/// layer sends back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, reason: &'static str) {
        self.0.push(Violation { field, reason });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any violation was recorded for `field`.
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl core::fmt::Display for Violations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, v) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl ProductInput {
    /// Check every field and, if all rules hold, produce a `ValidProductInput`.
    pub fn validate(self) -> Result<ValidProductInput, Violations> {
        let mut violations = Violations::new();

        check_name(self.name.as_deref(), &mut violations);

        if let Some(description) = self.description.as_deref() {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                violations.push("description", "must be at most 500 characters");
            }
        }

        match self.price {
            None => violations.push("price", "must not be null"),
            Some(price) if price < MIN_PRICE => violations.push("price", "must be at least 0.01"),
            Some(_) => {}
        }

        let stock = check_stock(self.stock, &mut violations);

        if self.category.is_none() {
            violations.push("category", "must not be null");
        }

        match (self.name, self.price, stock, self.category) {
            (Some(name), Some(price), Some(stock), Some(category)) if violations.is_empty() => {
                Ok(ValidProductInput {
                    name,
                    description: self.description,
                    price,
                    stock,
                    category,
                })
            }
            _ => Err(violations),
        }
    }
}

impl StockInput {
    /// Check the stock value and return it as a non-negative count.
    pub fn validate(self) -> Result<u32, Violations> {
        let mut violations = Violations::new();
        match check_stock(self.stock, &mut violations) {
            Some(stock) => Ok(stock),
            None => Err(violations),
        }
    }
}

fn check_name(name: Option<&str>, violations: &mut Violations) {
    let Some(name) = name else {
        violations.push("name", "must not be blank");
        return;
    };

    if name.trim().is_empty() {
        violations.push("name", "must not be blank");
    }

    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        violations.push("name", "must be between 3 and 100 characters");
    }
}

fn check_stock(stock: Option<i64>, violations: &mut Violations) -> Option<u32> {
    match stock {
        None => {
            violations.push("stock", "must not be null");
            None
        }
        Some(s) if s < 0 => {
            violations.push("stock", "must not be negative");
            None
        }
        Some(s) => match u32::try_from(s) {
            Ok(s) => Some(s),
            Err(_) => {
                violations.push("stock", "must be at most 4294967295");
                None
            }
        },
    }
}
