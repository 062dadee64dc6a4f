// Administrative scan-event CRUD
// Bypasses the slotting state machine; mounted under /v1/admin

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::scan_event_commands;
use backend_application::queries::scan_event_queries;
use backend_application::AppState;
use backend_domain::{PageQuery, ScanEvent, ScanEventPayload};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ScanEventPayload>,
) -> Result<(StatusCode, Json<ScanEvent>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = scan_event_commands::create_event(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<ScanEvent>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let events = scan_event_queries::list_events(&state, page).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ScanEvent>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = scan_event_queries::get_event(&state, id).await?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ScanEventPayload>,
) -> Result<Json<ScanEvent>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = scan_event_commands::update_event(&state, id, payload).await?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    scan_event_commands::delete_event(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
