use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{CellarSlot, PageQuery};

pub async fn list_slots(state: &AppState, page: PageQuery) -> Result<Vec<CellarSlot>, AppError> {
    Ok(state.slot_repo.list_slots(page).await?)
}

pub async fn get_slot(state: &AppState, id: Uuid) -> Result<CellarSlot, AppError> {
    state
        .slot_repo
        .get_slot(id)
        .await?
        .ok_or_else(|| AppError::NotFound("slot not found".to_string()))
}
