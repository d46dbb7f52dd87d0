use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
};
use tower_http::cors::CorsLayer;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    routes,
    services::{CatalogOptions, CatalogService},
    source::FsSource,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

pub fn create_state(config: &AppConfig) -> AppState {
    let source = FsSource::new(config.catalog.data_dir.clone());
    AppState::new(CatalogService::new(
        Arc::new(source),
        CatalogOptions::from(&config.catalog),
    ))
}

pub async fn build(config: &AppConfig, state: AppState) -> Result<Router> {
    if state.catalog.is_cached() {
        // A missing directory is not fatal at startup; requests keep retrying
        // until it shows up.
        match state.catalog.refresh_async().await {
            Ok(result) => tracing::info!(
                "Initial catalog loaded with {} products",
                result.products.len()
            ),
            Err(e) => tracing::warn!("Initial catalog load failed: {}", e),
        }
    }

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    Ok(router(state).layer(cors))
}

pub fn router(state: AppState) -> Router {
    routes::create_router().with_state(state)
}
