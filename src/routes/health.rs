use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let source = state.catalog.source().describe();

    match state.catalog.check_source().await {
        Ok(entries) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "source": source,
                "entries": entries,
                "cached": state.catalog.is_cached(),
                "snapshot": state.catalog.snapshot_info(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "source": source,
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
