// Slot registry CRUD plus the slotting and map endpoints

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::{slot_commands, slotting_commands};
use backend_application::queries::{cellar_queries, slot_queries};
use backend_application::AppState;
use backend_domain::{
    CellarSlot, CellarSlotPayload, LocateBottleRequest, PageQuery, ScanEvent, SlotColorEntry,
    SlotInRequest, SlotOutRequest, WineFilter,
};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn create_slot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CellarSlotPayload>,
) -> Result<(StatusCode, Json<CellarSlot>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let slot = slot_commands::create_slot(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn list_slots(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<CellarSlot>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let slots = slot_queries::list_slots(&state, page).await?;
    Ok(Json(slots))
}

pub async fn get_slot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<CellarSlot>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let slot = slot_queries::get_slot(&state, id).await?;
    Ok(Json(slot))
}

pub async fn update_slot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<CellarSlotPayload>,
) -> Result<Json<CellarSlot>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let slot = slot_commands::update_slot(&state, id, payload).await?;
    Ok(Json(slot))
}

pub async fn delete_slot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    slot_commands::delete_slot(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn locate_bottle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LocateBottleRequest>,
) -> Result<Json<Vec<SlotColorEntry>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let map = cellar_queries::locate_bottle(&state, payload.wine_id).await?;
    Ok(Json(map))
}

pub async fn lookup_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(filter): Json<WineFilter>,
) -> Result<Json<Vec<SlotColorEntry>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let map = cellar_queries::lookup_map(&state, filter).await?;
    Ok(Json(map))
}

pub async fn free_slot_map(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<SlotColorEntry>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let map = cellar_queries::free_slot_map(&state).await?;
    Ok(Json(map))
}

pub async fn slot_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SlotInRequest>,
) -> Result<(StatusCode, Json<ScanEvent>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = slotting_commands::slot_in(&state, payload.wine_id, payload.slot_id).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn slot_out(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SlotOutRequest>,
) -> Result<(StatusCode, Json<ScanEvent>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = slotting_commands::slot_out(&state, payload.wine_id).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
