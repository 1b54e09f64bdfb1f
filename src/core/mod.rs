//! Core module: the product model, validation rules, the paginated-query
//! engine, the store contract and the catalog domain service

pub mod error;
pub mod product;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{CatalogError, StoreError, ValidationErrors};
pub use product::{Product, ProductSummary};
pub use query::{PageRequest, PageResult, ProductQuery};
pub use service::{CatalogService, ProductCatalog};
pub use store::{ProductScan, ProductStore};
