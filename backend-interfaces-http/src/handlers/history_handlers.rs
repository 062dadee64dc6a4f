// Purchase, critic-score and metrics endpoints

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::{critic_score_commands, metrics_commands, purchase_commands};
use backend_application::queries::{critic_score_queries, metrics_queries, purchase_queries};
use backend_application::AppState;
use backend_domain::{
    CriticScore, CriticScorePayload, CriticScoreQuery, Purchase, PurchasePayload, PurchaseQuery,
    WineMetrics,
};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn create_purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PurchasePayload>,
) -> Result<(StatusCode, Json<Purchase>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let purchase = purchase_commands::create_purchase(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

pub async fn list_purchases(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PurchaseQuery>,
) -> Result<Json<Vec<Purchase>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let purchases = purchase_queries::list_purchases(&state, query).await?;
    Ok(Json(purchases))
}

pub async fn get_purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Purchase>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let purchase = purchase_queries::get_purchase(&state, id).await?;
    Ok(Json(purchase))
}

pub async fn update_purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<PurchasePayload>,
) -> Result<Json<Purchase>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let purchase = purchase_commands::update_purchase(&state, id, payload).await?;
    Ok(Json(purchase))
}

pub async fn delete_purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    purchase_commands::delete_purchase(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CriticScorePayload>,
) -> Result<(StatusCode, Json<CriticScore>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let score = critic_score_commands::create_score(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(score)))
}

pub async fn list_scores(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CriticScoreQuery>,
) -> Result<Json<Vec<CriticScore>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let scores = critic_score_queries::list_scores(&state, query).await?;
    Ok(Json(scores))
}

pub async fn get_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<CriticScore>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let score = critic_score_queries::get_score(&state, id).await?;
    Ok(Json(score))
}

pub async fn update_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<CriticScorePayload>,
) -> Result<Json<CriticScore>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let score = critic_score_commands::update_score(&state, id, payload).await?;
    Ok(Json(score))
}

pub async fn delete_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    critic_score_commands::delete_score(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(wine_id): Path<Uuid>,
) -> Result<Json<WineMetrics>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let metrics = metrics_queries::get_metrics(&state, wine_id).await?;
    Ok(Json(metrics))
}

pub async fn recompute_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(wine_id): Path<Uuid>,
) -> Result<Json<WineMetrics>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let metrics = metrics_commands::recompute_metrics(&state, wine_id).await?;
    Ok(Json(metrics))
}
