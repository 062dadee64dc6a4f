//! Administrative scan-event CRUD.
//!
//! These operations write the event log directly, bypassing the slotting
//! state machine: nothing here checks occupancy, and edits to historical
//! events change what the resolver derives. They exist as an operator
//! escape hatch; the invariant-preserving surface is
//! [`slotting_commands`](crate::commands::slotting_commands).

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{NewScanEvent, ScanEvent, ScanEventPayload};

async fn validate_event_refs(state: &AppState, payload: &ScanEventPayload) -> Result<(), AppError> {
    if !state.wine_repo.wine_exists(payload.wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    if state.slot_repo.get_slot(payload.slot_id).await?.is_none() {
        return Err(AppError::NotFound("slot not found".to_string()));
    }
    Ok(())
}

pub async fn create_event(
    state: &AppState,
    payload: ScanEventPayload,
) -> Result<ScanEvent, AppError> {
    validate_event_refs(state, &payload).await?;
    warn!(wine_id = %payload.wine_id, slot_id = %payload.slot_id,
        "scan event written through the administrative surface");
    let event = state
        .event_repo
        .append_event(&NewScanEvent {
            wine_id: payload.wine_id,
            slot_id: payload.slot_id,
            direction: payload.direction,
            timestamp: payload.timestamp.unwrap_or_else(Utc::now),
        })
        .await?;
    Ok(event)
}

pub async fn update_event(
    state: &AppState,
    id: Uuid,
    payload: ScanEventPayload,
) -> Result<ScanEvent, AppError> {
    let mut event = state
        .event_repo
        .get_event(id)
        .await?
        .ok_or_else(|| AppError::NotFound("scan event not found".to_string()))?;
    validate_event_refs(state, &payload).await?;
    warn!(event_id = %id, "scan event rewritten through the administrative surface");
    event.wine_id = payload.wine_id;
    event.slot_id = payload.slot_id;
    event.direction = payload.direction;
    if let Some(timestamp) = payload.timestamp {
        event.timestamp = timestamp;
    }
    state.event_repo.update_event(&event).await?;
    Ok(event)
}

pub async fn delete_event(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if !state.event_repo.delete_event(id).await? {
        return Err(AppError::NotFound("scan event not found".to_string()));
    }
    warn!(event_id = %id, "scan event deleted through the administrative surface");
    Ok(())
}
