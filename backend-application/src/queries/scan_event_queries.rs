use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{PageQuery, ScanEvent};

pub async fn list_events(state: &AppState, page: PageQuery) -> Result<Vec<ScanEvent>, AppError> {
    Ok(state.event_repo.list_events(page).await?)
}

pub async fn get_event(state: &AppState, id: Uuid) -> Result<ScanEvent, AppError> {
    state
        .event_repo
        .get_event(id)
        .await?
        .ok_or_else(|| AppError::NotFound("scan event not found".to_string()))
}
