use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{AppState, error::Result, queries::product_queries};

pub async fn get_categories(State(state): State<AppState>) -> Result<Response> {
    let catalog = state.catalog.list_async().await?;

    Ok(Json(product_queries::categories(&catalog.products)).into_response())
}
