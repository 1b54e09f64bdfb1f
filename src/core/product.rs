//! Product records and their read projections

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable product
///
/// The same shape is used as the create/update payload and as the full read
/// model. Every field defaults when absent from a payload so that missing
/// values surface as validation violations rather than decode failures.
///
/// `code` is the primary key and never changes once the product exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Unique identifier, format `NNNN-NNNN`
    pub code: String,

    /// Display name, 3 to 100 characters
    pub name: String,

    /// Optional free text, at most 500 characters
    pub description: Option<String>,

    /// Unit price, strictly positive with at most 2 fractional digits
    pub price: Decimal,
}

impl Product {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: Option<&str>,
        price: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: description.map(str::to_string),
            price,
        }
    }

    /// Overwrite the mutable fields with those of `changes`
    ///
    /// The code of `self` is kept even if `changes` carries a different one.
    pub fn apply_changes(&mut self, changes: Product) {
        self.name = changes.name;
        self.price = changes.price;
        self.description = changes.description;
    }
}

/// Listing projection of a [`Product`]: no description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub code: String,
    pub name: String,
    pub price: Decimal,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            code: product.code,
            name: product.name,
            price: product.price,
        }
    }
}
