use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{AppState, error::Result, models::RefreshResponse};

pub async fn get_catalog(State(state): State<AppState>) -> Result<Response> {
    let catalog = state.catalog.list_async().await?;

    Ok(Json(catalog.as_ref()).into_response())
}

pub async fn refresh_catalog(State(state): State<AppState>) -> Result<Json<RefreshResponse>> {
    let catalog = state.catalog.refresh_async().await?;

    tracing::info!(
        "Catalog refreshed: {} products, {} file errors",
        catalog.products.len(),
        catalog.file_errors.len()
    );

    Ok(Json(RefreshResponse::from(catalog.as_ref())))
}
