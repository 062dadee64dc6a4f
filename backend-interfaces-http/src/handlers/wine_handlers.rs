use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::wine_commands;
use backend_application::queries::wine_queries;
use backend_application::AppState;
use backend_domain::{PageQuery, WinePayload, WineRead};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn create_wine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<WinePayload>,
) -> Result<(StatusCode, Json<WineRead>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let wine = wine_commands::create_wine(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(wine)))
}

pub async fn list_wines(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<WineRead>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let wines = wine_queries::list_wines(&state, page).await?;
    Ok(Json(wines))
}

pub async fn get_wine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<WineRead>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let wine = wine_queries::get_wine(&state, id).await?;
    Ok(Json(wine))
}

pub async fn update_wine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<WinePayload>,
) -> Result<Json<WineRead>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let wine = wine_commands::update_wine(&state, id, payload).await?;
    Ok(Json(wine))
}

pub async fn delete_wine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    wine_commands::delete_wine(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
