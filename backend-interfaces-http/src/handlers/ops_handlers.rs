use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use backend_application::AppState;

use crate::error::HttpError;

pub async fn health_live() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn health_ready(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state
        .event_repo
        .ping()
        .await
        .map_err(|err| HttpError::Internal(err.to_string()))?;
    Ok(Json(json!({ "status": "ready" })))
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render_prometheus(),
    )
}
