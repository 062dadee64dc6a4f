use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::services::resolver::{locate_wine, slot_occupancy};
use backend_domain::{
    BottleLocation, LedState, NewScanEvent, ScanDirection, ScanEvent, SlotLedChange, SlotOccupancy,
};

/// Slot a bottle into a free slot. Appends an `IN` event after the
/// occupancy check; the check-then-append runs under the slotting lock.
///
/// Whether the wine is already sitting in some other slot is not
/// checked here; only the target slot's occupancy gates the transition.
pub async fn slot_in(
    state: &AppState,
    wine_id: Uuid,
    slot_id: Uuid,
) -> Result<ScanEvent, AppError> {
    let _guard = state.slotting_lock.lock().await;

    if !state.wine_repo.wine_exists(wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    let slot = state
        .slot_repo
        .get_slot(slot_id)
        .await?
        .ok_or_else(|| AppError::NotFound("slot not found".to_string()))?;

    let slot_events = state.event_repo.events_for_slot(slot_id).await?;
    if let SlotOccupancy::Occupied(_) = slot_occupancy(&slot_events) {
        state.metrics.record_slotting_conflict();
        return Err(AppError::Conflict("slot is occupied".to_string()));
    }

    let event = state
        .event_repo
        .append_event(&NewScanEvent {
            wine_id,
            slot_id,
            direction: ScanDirection::IN,
            timestamp: Utc::now(),
        })
        .await?;

    state.metrics.record_slot_in();
    info!(%wine_id, %slot_id, "bottle slotted in");
    state.notifier.spawn_notify(
        state.config.clone(),
        SlotLedChange {
            slot_id,
            led_node_id: slot.led_node_id,
            state: LedState::Occupied,
        },
    );
    Ok(event)
}

/// Take a bottle out of whichever slot it currently occupies.
pub async fn slot_out(state: &AppState, wine_id: Uuid) -> Result<ScanEvent, AppError> {
    let _guard = state.slotting_lock.lock().await;

    if !state.wine_repo.wine_exists(wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }

    let wine_events = state.event_repo.events_for_wine(wine_id).await?;
    let slot_id = match locate_wine(&wine_events) {
        BottleLocation::InSlot(slot_id) => slot_id,
        BottleLocation::Absent => {
            state.metrics.record_slotting_conflict();
            let message = if wine_events.is_empty() {
                "wine is not in any slot"
            } else {
                "wine is already out"
            };
            return Err(AppError::Conflict(message.to_string()));
        }
    };

    let event = state
        .event_repo
        .append_event(&NewScanEvent {
            wine_id,
            slot_id,
            direction: ScanDirection::OUT,
            timestamp: Utc::now(),
        })
        .await?;

    state.metrics.record_slot_out();
    info!(%wine_id, %slot_id, "bottle slotted out");
    if let Some(slot) = state.slot_repo.get_slot(slot_id).await? {
        state.notifier.spawn_notify(
            state.config.clone(),
            SlotLedChange {
                slot_id,
                led_node_id: slot.led_node_id,
                state: LedState::Free,
            },
        );
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn slot_in_places_bottle_and_notifies() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        let event = slot_in(&ctx.state, wine, slot).await.expect("slot in");
        assert_eq!(event.wine_id, wine);
        assert_eq!(event.slot_id, slot);
        assert_eq!(event.direction, ScanDirection::IN);

        let changes = ctx.notifier.changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].slot_id, slot);
        assert_eq!(changes[0].state, LedState::Occupied);
    }

    #[tokio::test]
    async fn occupied_slot_rejects_second_bottle() {
        let ctx = TestContext::new().await;
        let wine_a = ctx.add_wine("Ch. Margaux").await;
        let wine_b = ctx.add_wine("Ch. Latour").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine_a, slot).await.expect("first slot in");
        let err = slot_in(&ctx.state, wine_b, slot)
            .await
            .expect_err("double booking");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn repeated_slot_in_without_out_conflicts() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine, slot).await.expect("first slot in");
        let err = slot_in(&ctx.state, wine, slot)
            .await
            .expect_err("repeat slot in");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn slot_out_requires_prior_in() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;

        let err = slot_out(&ctx.state, wine).await.expect_err("never slotted");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn slot_out_frees_the_slot() {
        let ctx = TestContext::new().await;
        let wine_a = ctx.add_wine("Ch. Margaux").await;
        let wine_b = ctx.add_wine("Ch. Latour").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine_a, slot).await.expect("slot in");
        let event = slot_out(&ctx.state, wine_a).await.expect("slot out");
        assert_eq!(event.direction, ScanDirection::OUT);
        assert_eq!(event.slot_id, slot);

        // Freed slot accepts the next bottle.
        slot_in(&ctx.state, wine_b, slot).await.expect("reuse slot");

        let changes = ctx.notifier.changes();
        let states: Vec<LedState> = changes.iter().map(|c| c.state).collect();
        assert_eq!(states, vec![LedState::Occupied, LedState::Free, LedState::Occupied]);
    }

    #[tokio::test]
    async fn double_slot_out_conflicts() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine, slot).await.expect("slot in");
        slot_out(&ctx.state, wine).await.expect("slot out");
        let err = slot_out(&ctx.state, wine).await.expect_err("already out");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_wine_and_slot_are_not_found() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        let err = slot_in(&ctx.state, Uuid::new_v4(), slot)
            .await
            .expect_err("unknown wine");
        assert!(matches!(err, AppError::NotFound(_)));

        let err = slot_in(&ctx.state, wine, Uuid::new_v4())
            .await
            .expect_err("unknown slot");
        assert!(matches!(err, AppError::NotFound(_)));

        let err = slot_out(&ctx.state, Uuid::new_v4())
            .await
            .expect_err("unknown wine");
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
