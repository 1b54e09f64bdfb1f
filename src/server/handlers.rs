//! HTTP handlers for product operations
//!
//! Handlers only translate between HTTP and the catalog; every rule lives in
//! the domain service, and failures render through [`CatalogError`].

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::PaginationConfig;
use crate::core::error::CatalogError;
use crate::core::product::{Product, ProductSummary};
use crate::core::query::{PageResult, ProductQuery};
use crate::core::service::ProductCatalog;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ProductCatalog>,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(catalog: Arc<dyn ProductCatalog>, pagination: PaginationConfig) -> Self {
        Self {
            catalog,
            pagination,
        }
    }
}

/// Query string of the listing endpoint
///
/// `searchItem` is accepted as an alias of `searchTerm`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    #[serde(alias = "searchItem")]
    pub search_term: Option<String>,
    pub sort_column: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListParams {
    /// Fill in the configured page size and cap it
    ///
    /// Non-positive values are passed through so the service rejects them.
    pub fn into_query(self, pagination: &PaginationConfig) -> ProductQuery {
        let page_size = self
            .page_size
            .unwrap_or(pagination.default_page_size)
            .min(pagination.max_page_size);

        ProductQuery {
            search_term: self.search_term,
            sort_column: self.sort_column,
            sort_order: self.sort_order,
            page: self.page.unwrap_or(1),
            page_size,
        }
    }
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<StatusCode, CatalogError> {
    state.catalog.create(product).await?;
    Ok(StatusCode::CREATED)
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResult<ProductSummary>>, CatalogError> {
    let query = params.into_query(&state.pagination);
    let page = state.catalog.list(&query).await?;
    Ok(Json(page))
}

/// GET /api/products/{code}
pub async fn get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Product>, CatalogError> {
    let product = state.catalog.get_by_code(&code).await?;
    Ok(Json(product))
}

/// PUT /api/products
pub async fn update_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<StatusCode, CatalogError> {
    state.catalog.update(product).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/products with the code as a JSON string body
pub async fn delete_product(
    State(state): State<AppState>,
    Json(code): Json<String>,
) -> Result<StatusCode, CatalogError> {
    state.catalog.delete(&code).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/products/{code}
pub async fn delete_product_by_path(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, CatalogError> {
    state.catalog.delete(&code).await?;
    Ok(StatusCode::OK)
}
