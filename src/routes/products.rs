use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::Result,
    models::{QuerySpec, SearchParams, SearchResponse},
    queries::product_queries,
};

pub async fn list_products(State(state): State<AppState>) -> Result<Response> {
    let catalog = state.catalog.list_async().await?;

    Ok(Json(&catalog.products).into_response())
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response> {
    let spec = QuerySpec::try_from(params)?;
    let catalog = state.catalog.list_async().await?;

    let products = product_queries::query(&catalog.products, &spec);

    Ok(Json(SearchResponse {
        shown: products.len(),
        total: catalog.products.len(),
        products,
    })
    .into_response())
}
