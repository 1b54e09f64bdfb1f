//! The catalog domain service
//!
//! [`CatalogService`] validates input, enforces the existence and uniqueness
//! invariants against a [`ProductStore`], and composes the paginated-query
//! engine for listings. The store is injected at construction.

use crate::core::error::{CatalogError, StoreError};
use crate::core::product::{Product, ProductSummary};
use crate::core::query::{PageResult, ProductQuery, paginate};
use crate::core::store::{ProductScan, ProductStore};
use crate::core::validation::{validate_code, validate_product};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Catalog operations as seen by a transport
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Create a new product; fails with `AlreadyExists` for a known code
    async fn create(&self, product: Product) -> Result<(), CatalogError>;

    /// Get the full record of a product
    async fn get_by_code(&self, code: &str) -> Result<Product, CatalogError>;

    /// Search, sort and paginate products
    async fn list(&self, query: &ProductQuery) -> Result<PageResult<ProductSummary>, CatalogError>;

    /// Overwrite name, price and description of an existing product
    async fn update(&self, product: Product) -> Result<(), CatalogError>;

    /// Delete an existing product
    async fn delete(&self, code: &str) -> Result<(), CatalogError>;
}

/// Domain service over an injected product store
///
/// Every store call can be bounded by a timeout; dropping an operation's
/// future cancels the in-flight store call.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    store_timeout: Option<Duration>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            store_timeout: None,
        }
    }

    /// Fail any store call that takes longer than `timeout`
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match self.store_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| StoreError::timeout(operation, limit))?,
            None => call.await,
        }
    }

    async fn find(&self, code: &str) -> Result<Option<Product>, StoreError> {
        self.bounded("find_by_code", self.store.find_by_code(code))
            .await
    }

    async fn create_product(&self, product: Product) -> Result<(), CatalogError> {
        validate_product(&product)?;

        if self.find(&product.code).await?.is_some() {
            return Err(CatalogError::AlreadyExists { code: product.code });
        }

        // A concurrent create can still win the race; the store reports it as a conflict
        self.bounded("insert", self.store.insert(product)).await?;
        Ok(())
    }

    async fn get_product(&self, code: &str) -> Result<Product, CatalogError> {
        validate_code(code)?;

        self.find(code).await?.ok_or_else(|| CatalogError::NotFound {
            code: code.to_string(),
        })
    }

    async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<PageResult<ProductSummary>, CatalogError> {
        let request = query.page_request()?;
        let scan = ProductScan::new(
            query.search(),
            query.sort_column(),
            query.sort_order().is_descending(),
        );

        let view = self.store.scan(scan);
        let page = self.bounded("scan", paginate(view.as_ref(), request)).await?;

        Ok(page.map(ProductSummary::from))
    }

    async fn update_product(&self, changes: Product) -> Result<(), CatalogError> {
        validate_product(&changes)?;

        let Some(mut product) = self.find(&changes.code).await? else {
            return Err(CatalogError::NotFound { code: changes.code });
        };

        product.apply_changes(changes);
        self.bounded("update", self.store.update(product)).await?;
        Ok(())
    }

    async fn delete_product(&self, code: &str) -> Result<(), CatalogError> {
        validate_code(code)?;

        if self.find(code).await?.is_none() {
            return Err(CatalogError::NotFound {
                code: code.to_string(),
            });
        }

        self.bounded("remove", self.store.remove(code)).await?;
        Ok(())
    }
}

fn log_outcome<T>(operation: &'static str, code: &str, result: &Result<T, CatalogError>) {
    match result {
        Ok(_) => tracing::info!(operation, code = %code, "Product {} succeeded", operation),
        Err(err) if err.is_caller_error() => tracing::warn!(
            operation,
            code = %code,
            error_code = err.error_code(),
            "Product {} rejected: {}",
            operation,
            err
        ),
        Err(err) => tracing::error!(
            operation,
            code = %code,
            error_code = err.error_code(),
            "Product {} failed: {}",
            operation,
            err
        ),
    }
}

#[async_trait]
impl ProductCatalog for CatalogService {
    async fn create(&self, product: Product) -> Result<(), CatalogError> {
        let code = product.code.clone();
        let result = self.create_product(product).await;
        log_outcome("create", &code, &result);
        result
    }

    async fn get_by_code(&self, code: &str) -> Result<Product, CatalogError> {
        let result = self.get_product(code).await;
        log_outcome("get", code, &result);
        result
    }

    async fn list(&self, query: &ProductQuery) -> Result<PageResult<ProductSummary>, CatalogError> {
        let result = self.list_products(query).await;
        match &result {
            Ok(page) => tracing::info!(
                total = page.pagination.total,
                page = page.pagination.page,
                returned = page.items.len(),
                "Retrieved products"
            ),
            Err(err) if err.is_caller_error() => tracing::warn!(
                error_code = err.error_code(),
                "Product list rejected: {}",
                err
            ),
            Err(err) => tracing::error!(
                error_code = err.error_code(),
                "Product list failed: {}",
                err
            ),
        }
        result
    }

    async fn update(&self, product: Product) -> Result<(), CatalogError> {
        let code = product.code.clone();
        let result = self.update_product(product).await;
        log_outcome("update", &code, &result);
        result
    }

    async fn delete(&self, code: &str) -> Result<(), CatalogError> {
        let result = self.delete_product(code).await;
        log_outcome("delete", code, &result);
        result
    }
}
