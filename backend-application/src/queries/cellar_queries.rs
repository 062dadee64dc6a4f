use std::collections::BTreeSet;

use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::services::resolver::{latest_in_slots, locate_wine, occupied_slots};
use backend_domain::{BottleLocation, SlotColor, SlotColorEntry, WineFilter};

/// Render the full slot map with the bottle's current slot highlighted.
pub async fn locate_bottle(
    state: &AppState,
    wine_id: Uuid,
) -> Result<Vec<SlotColorEntry>, AppError> {
    let events = state.event_repo.events_for_wine(wine_id).await?;
    if events.is_empty() {
        return Err(AppError::NotFound(
            "wine has never been slotted in or out".to_string(),
        ));
    }
    let occupied = match locate_wine(&events) {
        BottleLocation::InSlot(slot_id) => slot_id,
        BottleLocation::Absent => {
            return Err(AppError::Conflict(
                "wine is currently out of the cellar".to_string(),
            ));
        }
    };

    let slots = state.slot_repo.all_slots().await?;
    Ok(slots
        .into_iter()
        .map(|slot| SlotColorEntry {
            slot_id: slot.id,
            color: if slot.id == occupied {
                SlotColor::Highlight
            } else {
                SlotColor::Default
            },
        })
        .collect())
}

/// Render the slot map with slots holding filter-matching wines marked.
/// Matching goes through each wine's most recent IN event; bottles
/// slotted out afterwards still mark their last slot.
pub async fn lookup_map(
    state: &AppState,
    filter: WineFilter,
) -> Result<Vec<SlotColorEntry>, AppError> {
    let wine_ids: BTreeSet<Uuid> = state
        .wine_repo
        .filter_wine_ids(&filter)
        .await?
        .into_iter()
        .collect();
    let events = state.event_repo.all_events().await?;
    let matched = latest_in_slots(&events, &wine_ids);

    let slots = state.slot_repo.all_slots().await?;
    Ok(slots
        .into_iter()
        .map(|slot| SlotColorEntry {
            slot_id: slot.id,
            color: if matched.contains(&slot.id) {
                SlotColor::Match
            } else {
                SlotColor::Default
            },
        })
        .collect())
}

/// Render only the free slots; occupied slots are omitted entirely.
pub async fn free_slot_map(state: &AppState) -> Result<Vec<SlotColorEntry>, AppError> {
    let events = state.event_repo.all_events().await?;
    let occupied = occupied_slots(&events);

    let slots = state.slot_repo.all_slots().await?;
    Ok(slots
        .into_iter()
        .filter(|slot| !occupied.contains_key(&slot.id))
        .map(|slot| SlotColorEntry {
            slot_id: slot.id,
            color: SlotColor::Available,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::slotting_commands::{slot_in, slot_out};
    use crate::test_support::TestContext;

    fn color_of(map: &[SlotColorEntry], slot_id: Uuid) -> SlotColor {
        map.iter()
            .find(|entry| entry.slot_id == slot_id)
            .expect("slot present in map")
            .color
    }

    #[tokio::test]
    async fn locate_highlights_current_slot() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot_a = ctx.add_slot(1, "A").await;
        let slot_b = ctx.add_slot(1, "B").await;

        slot_in(&ctx.state, wine, slot_a).await.expect("slot in");

        let map = locate_bottle(&ctx.state, wine).await.expect("locate");
        assert_eq!(map.len(), 2);
        assert_eq!(color_of(&map, slot_a), SlotColor::Highlight);
        assert_eq!(color_of(&map, slot_b), SlotColor::Default);
    }

    #[tokio::test]
    async fn locate_without_history_is_not_found() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        ctx.add_slot(1, "A").await;

        let err = locate_bottle(&ctx.state, wine).await.expect_err("no history");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn locate_after_slot_out_conflicts() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine, slot).await.expect("slot in");
        slot_out(&ctx.state, wine).await.expect("slot out");

        let err = locate_bottle(&ctx.state, wine).await.expect_err("out of cellar");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn empty_filter_marks_every_slotted_wine() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot_a = ctx.add_slot(1, "A").await;
        let slot_b = ctx.add_slot(1, "B").await;

        slot_in(&ctx.state, wine, slot_a).await.expect("slot in");

        let map = lookup_map(&ctx.state, WineFilter::default())
            .await
            .expect("lookup map");
        assert_eq!(color_of(&map, slot_a), SlotColor::Match);
        assert_eq!(color_of(&map, slot_b), SlotColor::Default);
    }

    #[tokio::test]
    async fn country_filter_restricts_matches() {
        let ctx = TestContext::new().await;
        let france = Uuid::new_v4();
        let italy = Uuid::new_v4();
        let wine_fr = ctx.add_wine_in_country("Ch. Margaux", france).await;
        let wine_it = ctx.add_wine_in_country("Barolo Riserva", italy).await;
        let slot_a = ctx.add_slot(1, "A").await;
        let slot_b = ctx.add_slot(1, "B").await;

        slot_in(&ctx.state, wine_fr, slot_a).await.expect("slot in fr");
        slot_in(&ctx.state, wine_it, slot_b).await.expect("slot in it");

        let filter = WineFilter {
            country_id: Some(france),
            ..WineFilter::default()
        };
        let map = lookup_map(&ctx.state, filter).await.expect("lookup map");
        assert_eq!(color_of(&map, slot_a), SlotColor::Match);
        assert_eq!(color_of(&map, slot_b), SlotColor::Default);
    }

    #[tokio::test]
    async fn lookup_map_keeps_marking_after_slot_out() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine, slot).await.expect("slot in");
        slot_out(&ctx.state, wine).await.expect("slot out");

        // The bottle is gone but its last IN slot still matches.
        let map = lookup_map(&ctx.state, WineFilter::default())
            .await
            .expect("lookup map");
        assert_eq!(color_of(&map, slot), SlotColor::Match);
    }

    #[tokio::test]
    async fn free_map_omits_occupied_slots() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot_a = ctx.add_slot(1, "A").await;
        let slot_b = ctx.add_slot(1, "B").await;

        slot_in(&ctx.state, wine, slot_a).await.expect("slot in");

        let map = free_slot_map(&ctx.state).await.expect("free map");
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].slot_id, slot_b);
        assert_eq!(map[0].color, SlotColor::Available);
    }

    #[tokio::test]
    async fn freed_slot_reappears_in_free_map() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        let slot = ctx.add_slot(1, "A").await;

        slot_in(&ctx.state, wine, slot).await.expect("slot in");
        assert!(free_slot_map(&ctx.state).await.expect("free map").is_empty());

        slot_out(&ctx.state, wine).await.expect("slot out");
        let map = free_slot_map(&ctx.state).await.expect("free map");
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].slot_id, slot);
    }
}
