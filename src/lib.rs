//! # Product Catalog
//!
//! A catalog service for a single entity: the sellable [`Product`](core::product::Product),
//! identified by a structured `NNNN-NNNN` code.
//!
//! ## Features
//!
//! - **Domain Service**: create/read/update/delete with uniqueness and existence checks
//! - **Validation Rules**: every field violation is reported, not just the first
//! - **Paginated Queries**: search, sort and window a collection with one count pass
//!   and one bounded fetch pass
//! - **Pluggable Stores**: in-memory store out of the box, PostgreSQL behind the
//!   `postgres` feature
//! - **REST Exposure**: axum router with typed error responses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let store = Arc::new(InMemoryProductStore::new());
//! let catalog = CatalogService::new(store);
//!
//! catalog
//!     .create(Product::new("1234-5678", "Laptop", None, Decimal::new(120000, 2)))
//!     .await?;
//!
//! let page = catalog.list(&ProductQuery::default()).await?;
//! assert_eq!(page.pagination.total, 1);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{CatalogError, FieldViolation, StoreError, ValidationErrors},
        product::{Product, ProductSummary},
        query::{PageMeta, PageRequest, PageResult, ProductQuery, SortColumn, SortOrder},
        service::{CatalogService, ProductCatalog},
        store::{ProductScan, ProductStore},
        validation::{validate_code, validate_product},
    };

    // === Storage ===
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresProductStore;
    pub use crate::storage::{InMemoryProductStore, seed_if_empty};

    // === Config ===
    pub use crate::config::CatalogConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
