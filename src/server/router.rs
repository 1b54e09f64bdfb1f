//! Router construction for the catalog REST API

use super::handlers::{
    AppState, create_product, delete_product, delete_product_by_path, get_product, list_products,
    update_product,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build the catalog routes
///
/// - GET /health, GET /healthz - Liveness
/// - POST /api/products - Create
/// - GET /api/products - Search, sort and paginate
/// - PUT /api/products - Update
/// - DELETE /api/products - Delete, code as JSON string body
/// - GET /api/products/{code} - Get one
/// - DELETE /api/products/{code} - Delete, code in path
pub fn build_router(state: AppState) -> Router {
    let product_routes = Router::new()
        .route(
            "/api/products",
            get(list_products)
                .post(create_product)
                .put(update_product)
                .delete(delete_product),
        )
        .route(
            "/api/products/{code}",
            get(get_product).delete(delete_product_by_path),
        )
        .with_state(state);

    health_routes().merge(product_routes)
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "product-catalog"
    }))
}
