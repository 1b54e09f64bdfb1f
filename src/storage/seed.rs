//! Sample products loaded into an empty store at startup

use crate::core::error::StoreError;
use crate::core::product::Product;
use crate::core::store::{ProductScan, ProductStore};
use rust_decimal::Decimal;

/// The products a fresh catalog starts with
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(
            "1234-5678",
            "Laptop",
            Some("A high-performance laptop for work."),
            Decimal::new(120000, 2),
        ),
        Product::new(
            "9876-5432",
            "Smartphone",
            Some("A sleek and powerful smartphone with excellent camera quality."),
            Decimal::new(80000, 2),
        ),
        Product::new("2468-1357", "Headphones", None, Decimal::new(15000, 2)),
    ]
}

/// Insert [`sample_products`] when the store holds no products
///
/// Returns how many products were inserted. A store that already has data
/// is left untouched; a code inserted concurrently by someone else is skipped.
pub async fn seed_if_empty(store: &dyn ProductStore) -> Result<usize, StoreError> {
    if store.scan(ProductScan::default()).count().await? > 0 {
        tracing::debug!("Store already holds products, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for product in sample_products() {
        match store.insert(product).await {
            Ok(()) => inserted += 1,
            Err(StoreError::Conflict { code }) => {
                tracing::debug!(code = %code, "Seed product already present");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(inserted, "Seeded product catalog");
    Ok(inserted)
}
