use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{CellarSlot, CellarSlotPayload};

pub async fn create_slot(
    state: &AppState,
    payload: CellarSlotPayload,
) -> Result<CellarSlot, AppError> {
    if state
        .slot_repo
        .find_slot_by_position(payload.rack, &payload.row)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("slot already exists".to_string()));
    }
    let slot = CellarSlot {
        id: Uuid::new_v4(),
        rack: payload.rack,
        row: payload.row,
        led_node_id: payload.led_node_id,
    };
    state.slot_repo.insert_slot(&slot).await?;
    Ok(slot)
}

pub async fn update_slot(
    state: &AppState,
    id: Uuid,
    payload: CellarSlotPayload,
) -> Result<CellarSlot, AppError> {
    let mut slot = state
        .slot_repo
        .get_slot(id)
        .await?
        .ok_or_else(|| AppError::NotFound("slot not found".to_string()))?;
    if let Some(other) = state
        .slot_repo
        .find_slot_by_position(payload.rack, &payload.row)
        .await?
    {
        if other != id {
            return Err(AppError::Conflict("slot already exists".to_string()));
        }
    }
    slot.rack = payload.rack;
    slot.row = payload.row;
    slot.led_node_id = payload.led_node_id;
    state.slot_repo.update_slot(&slot).await?;
    Ok(slot)
}

/// Slots with scan history cannot be deleted; the events reference them
/// and occupancy resolution would lose its registry entry.
pub async fn delete_slot(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.slot_repo.get_slot(id).await?.is_none() {
        return Err(AppError::NotFound("slot not found".to_string()));
    }
    if state.event_repo.slot_has_events(id).await? {
        return Err(AppError::Conflict(
            "slot is referenced by scan events".to_string(),
        ));
    }
    state.slot_repo.delete_slot(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::slotting_commands::slot_in;
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn duplicate_position_conflicts() {
        let ctx = TestContext::new().await;
        let payload = CellarSlotPayload {
            rack: 1,
            row: "A".to_string(),
            led_node_id: "led-1".to_string(),
        };
        create_slot(&ctx.state, payload.clone()).await.expect("create");
        let err = create_slot(&ctx.state, payload).await.expect_err("duplicate");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_rejected_while_events_reference_slot() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine, slot).await.expect("slot in");
        let err = delete_slot(&ctx.state, slot).await.expect_err("has history");
        assert!(matches!(err, AppError::Conflict(_)));

        let empty = ctx.add_slot(2, "B").await;
        delete_slot(&ctx.state, empty).await.expect("delete empty slot");
    }
}
