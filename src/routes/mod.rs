mod catalog;
mod categories;
mod health;
mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/products", get(products::list_products))
        .route("/api/products/search", get(products::search_products))
        .route("/api/categories", get(categories::get_categories))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/catalog/refresh", post(catalog::refresh_catalog))
}
