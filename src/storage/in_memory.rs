//! In-memory implementation of ProductStore for testing and development

use crate::core::error::StoreError;
use crate::core::product::Product;
use crate::core::query::PageSource;
use crate::core::store::{ProductScan, ProductStore, ProductView};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

type Products = Arc<RwLock<BTreeMap<String, Product>>>;

/// In-memory product store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same products.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Products,
}

impl InMemoryProductStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products`; later duplicates replace earlier ones
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products
            .into_iter()
            .map(|p| (p.code.clone(), p))
            .collect::<BTreeMap<_, _>>();
        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored products
    pub fn len(&self) -> Result<usize, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|e| StoreError::backend(BACKEND, format!("Failed to acquire read lock: {}", e)))?;
        Ok(products.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|e| StoreError::backend(BACKEND, format!("Failed to acquire read lock: {}", e)))?;

        Ok(products.get(code).cloned())
    }

    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|e| StoreError::backend(BACKEND, format!("Failed to acquire write lock: {}", e)))?;

        match products.entry(product.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict { code: product.code }),
            Entry::Vacant(slot) => {
                slot.insert(product);
                Ok(())
            }
        }
    }

    async fn update(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|e| StoreError::backend(BACKEND, format!("Failed to acquire write lock: {}", e)))?;

        match products.get_mut(&product.code) {
            Some(stored) => {
                *stored = product;
                Ok(())
            }
            None => Err(StoreError::Absent { code: product.code }),
        }
    }

    async fn remove(&self, code: &str) -> Result<(), StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|e| StoreError::backend(BACKEND, format!("Failed to acquire write lock: {}", e)))?;

        products
            .remove(code)
            .map(|_| ())
            .ok_or_else(|| StoreError::Absent {
                code: code.to_string(),
            })
    }

    fn scan(&self, scan: ProductScan) -> ProductView<'_> {
        Box::new(InMemoryView {
            products: self.products.clone(),
            scan,
        })
    }
}

/// Scan view over the in-memory map
///
/// Filtering and sorting run on borrowed records; only the requested
/// window is cloned.
struct InMemoryView {
    products: Products,
    scan: ProductScan,
}

#[async_trait]
impl PageSource for InMemoryView {
    type Item = Product;

    async fn count(&self) -> Result<u64, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|e| StoreError::backend(BACKEND, format!("Failed to acquire read lock: {}", e)))?;

        Ok(products.values().filter(|p| self.scan.matches(p)).count() as u64)
    }

    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<Product>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|e| StoreError::backend(BACKEND, format!("Failed to acquire read lock: {}", e)))?;

        let mut matching: Vec<&Product> =
            products.values().filter(|p| self.scan.matches(p)).collect();
        matching.sort_by(|a, b| self.scan.compare(a, b));

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
