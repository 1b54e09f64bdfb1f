//! Store contract for product persistence

use crate::core::error::StoreError;
use crate::core::product::Product;
use crate::core::query::{PageSource, SortColumn};
use async_trait::async_trait;
use std::cmp::Ordering;

/// A filtered, sorted view over stored products
pub type ProductView<'a> = Box<dyn PageSource<Item = Product> + 'a>;

/// Parameters of a store scan
///
/// `search` is matched case-insensitively as a substring of the name or the
/// description. Results are ordered by `sort_column`, then by code, both in
/// the requested direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductScan {
    pub search: Option<String>,
    pub sort_column: SortColumn,
    pub descending: bool,
}

impl ProductScan {
    pub fn new(search: Option<&str>, sort_column: SortColumn, descending: bool) -> Self {
        Self {
            search: search.map(str::to_string),
            sort_column,
            descending,
        }
    }

    /// Whether `product` passes the search filter
    pub fn matches(&self, product: &Product) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let term = term.to_lowercase();

        product.name.to_lowercase().contains(&term)
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }

    /// Ordering of two products in this scan
    ///
    /// Text compares by code point, so upper case sorts before lower case.
    /// A missing description sorts before any present one when ascending.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.sort_column {
            SortColumn::Code => Ordering::Equal,
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Description => a.description.cmp(&b.description),
            SortColumn::Price => a.price.cmp(&b.price),
        };
        let ordering = primary.then_with(|| a.code.cmp(&b.code));

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Persistence contract for products, keyed by code
///
/// Each write is atomic on its own. Uniqueness of codes must be enforced by
/// the store itself: `insert` reports [`StoreError::Conflict`] for an existing
/// code even when two inserts race.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Point lookup by code
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, StoreError>;

    /// Persist a new product, or [`StoreError::Conflict`]
    async fn insert(&self, product: Product) -> Result<(), StoreError>;

    /// Overwrite the product with the same code, or [`StoreError::Absent`]
    async fn update(&self, product: Product) -> Result<(), StoreError>;

    /// Remove the product with this code, or [`StoreError::Absent`]
    async fn remove(&self, code: &str) -> Result<(), StoreError>;

    /// Filtered, sorted view supporting count and offset/limit fetch
    fn scan(&self, scan: ProductScan) -> ProductView<'_>;
}
