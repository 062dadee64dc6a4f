//! Occupancy resolution over the scan-event log.
//!
//! Everything here is a pure function of the event set. The latest event
//! for a grouping key is the maximum by `(timestamp, seq)`: when two
//! events carry the same timestamp, the one inserted later (larger seq)
//! wins. That rule is defined once, in `is_later`, and applied by every
//! resolution path.
//!
//! Per-wine and per-slot grouping answer different questions and are kept
//! as separate functions: "where is this bottle" follows the wine across
//! slots, while "is a bottle in this slot" follows the slot across wines.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use crate::entities::{ScanDirection, ScanEvent};
use crate::value_objects::{BottleLocation, SlotOccupancy};

fn is_later(candidate: &ScanEvent, current: &ScanEvent) -> bool {
    (candidate.timestamp, candidate.seq) > (current.timestamp, current.seq)
}

fn latest_of<'a>(events: impl Iterator<Item = &'a ScanEvent>) -> Option<&'a ScanEvent> {
    let mut latest: Option<&ScanEvent> = None;
    for event in events {
        let replace = match latest {
            Some(current) => is_later(event, current),
            None => true,
        };
        if replace {
            latest = Some(event);
        }
    }
    latest
}

/// Where the wine owning `events` currently is. The slice must contain
/// only that wine's events.
pub fn locate_wine(events: &[ScanEvent]) -> BottleLocation {
    match latest_of(events.iter()) {
        Some(event) if event.direction == ScanDirection::IN => BottleLocation::InSlot(event.slot_id),
        _ => BottleLocation::Absent,
    }
}

/// Whether the slot owning `events` currently holds a bottle. The slice
/// must contain only that slot's events; the latest one across all wines
/// decides.
pub fn slot_occupancy(events: &[ScanEvent]) -> SlotOccupancy {
    match latest_of(events.iter()) {
        Some(event) if event.direction == ScanDirection::IN => SlotOccupancy::Occupied(event.wine_id),
        _ => SlotOccupancy::Free,
    }
}

/// Occupied slots over the full log: the latest event per slot, kept when
/// its direction is `IN`, mapped slot -> occupying wine.
pub fn occupied_slots(events: &[ScanEvent]) -> BTreeMap<Uuid, Uuid> {
    let mut latest_per_slot: BTreeMap<Uuid, &ScanEvent> = BTreeMap::new();
    for event in events {
        let replace = match latest_per_slot.get(&event.slot_id) {
            Some(current) => is_later(event, current),
            None => true,
        };
        if replace {
            latest_per_slot.insert(event.slot_id, event);
        }
    }
    latest_per_slot
        .into_iter()
        .filter(|(_, event)| event.direction == ScanDirection::IN)
        .map(|(slot_id, event)| (slot_id, event.wine_id))
        .collect()
}

/// Slots reached by the most recent `IN` event of each wine in `wines`.
/// OUT events are deliberately not consulted: a bottle slotted in and
/// later removed still maps its last slot. This is the lookup-map
/// resolution, distinct from [`occupied_slots`].
pub fn latest_in_slots(events: &[ScanEvent], wines: &BTreeSet<Uuid>) -> BTreeSet<Uuid> {
    let mut latest_in_per_wine: BTreeMap<Uuid, &ScanEvent> = BTreeMap::new();
    for event in events {
        if event.direction != ScanDirection::IN || !wines.contains(&event.wine_id) {
            continue;
        }
        let replace = match latest_in_per_wine.get(&event.wine_id) {
            Some(current) => is_later(event, current),
            None => true,
        };
        if replace {
            latest_in_per_wine.insert(event.wine_id, event);
        }
    }
    latest_in_per_wine
        .into_values()
        .map(|event| event.slot_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn event(seq: i64, wine: Uuid, slot: Uuid, direction: ScanDirection, at: i64) -> ScanEvent {
        ScanEvent {
            id: Uuid::new_v4(),
            seq,
            wine_id: wine,
            slot_id: slot,
            direction,
            timestamp: ts(at),
        }
    }

    #[test]
    fn wine_with_no_events_is_absent() {
        assert_eq!(locate_wine(&[]), BottleLocation::Absent);
    }

    #[test]
    fn wine_follows_latest_event() {
        let wine = Uuid::new_v4();
        let slot_a = Uuid::new_v4();
        let slot_b = Uuid::new_v4();
        let events = vec![
            event(1, wine, slot_a, ScanDirection::IN, 0),
            event(2, wine, slot_a, ScanDirection::OUT, 10),
            event(3, wine, slot_b, ScanDirection::IN, 20),
        ];
        assert_eq!(locate_wine(&events), BottleLocation::InSlot(slot_b));
    }

    #[test]
    fn wine_out_after_in_is_absent() {
        let wine = Uuid::new_v4();
        let slot = Uuid::new_v4();
        let events = vec![
            event(1, wine, slot, ScanDirection::IN, 0),
            event(2, wine, slot, ScanDirection::OUT, 10),
        ];
        assert_eq!(locate_wine(&events), BottleLocation::Absent);
    }

    #[test]
    fn equal_timestamps_break_by_seq() {
        let wine = Uuid::new_v4();
        let slot = Uuid::new_v4();
        // Same instant, OUT inserted after IN: the later insert wins.
        let events = vec![
            event(7, wine, slot, ScanDirection::IN, 5),
            event(8, wine, slot, ScanDirection::OUT, 5),
        ];
        assert_eq!(locate_wine(&events), BottleLocation::Absent);
        assert_eq!(slot_occupancy(&events), SlotOccupancy::Free);

        // Reversed insertion order flips the outcome.
        let events = vec![
            event(8, wine, slot, ScanDirection::IN, 5),
            event(7, wine, slot, ScanDirection::OUT, 5),
        ];
        assert_eq!(locate_wine(&events), BottleLocation::InSlot(slot));
    }

    #[test]
    fn resolution_ignores_slice_order() {
        let wine = Uuid::new_v4();
        let slot = Uuid::new_v4();
        let a = event(1, wine, slot, ScanDirection::IN, 0);
        let b = event(2, wine, slot, ScanDirection::OUT, 10);
        assert_eq!(locate_wine(&[a.clone(), b.clone()]), BottleLocation::Absent);
        assert_eq!(locate_wine(&[b, a]), BottleLocation::Absent);
    }

    #[test]
    fn slot_occupancy_groups_by_slot_not_wine() {
        let wine_a = Uuid::new_v4();
        let wine_b = Uuid::new_v4();
        let slot = Uuid::new_v4();
        // wine_a leaves, wine_b takes the slot: slot events alone decide.
        let events = vec![
            event(1, wine_a, slot, ScanDirection::IN, 0),
            event(2, wine_a, slot, ScanDirection::OUT, 10),
            event(3, wine_b, slot, ScanDirection::IN, 20),
        ];
        assert_eq!(slot_occupancy(&events), SlotOccupancy::Occupied(wine_b));
    }

    #[test]
    fn occupied_and_free_partition_the_log() {
        let wine_a = Uuid::new_v4();
        let wine_b = Uuid::new_v4();
        let slot_a = Uuid::new_v4();
        let slot_b = Uuid::new_v4();
        let slot_c = Uuid::new_v4();
        let events = vec![
            event(1, wine_a, slot_a, ScanDirection::IN, 0),
            event(2, wine_b, slot_b, ScanDirection::IN, 5),
            event(3, wine_b, slot_b, ScanDirection::OUT, 10),
            event(4, wine_b, slot_c, ScanDirection::IN, 15),
        ];
        let occupied = occupied_slots(&events);
        assert_eq!(occupied.get(&slot_a), Some(&wine_a));
        assert_eq!(occupied.get(&slot_b), None);
        assert_eq!(occupied.get(&slot_c), Some(&wine_b));
        assert_eq!(occupied.len(), 2);
    }

    #[test]
    fn single_occupancy_holds_per_slot() {
        let wine_a = Uuid::new_v4();
        let wine_b = Uuid::new_v4();
        let slot = Uuid::new_v4();
        let events = vec![
            event(1, wine_a, slot, ScanDirection::IN, 0),
            event(2, wine_b, slot, ScanDirection::IN, 5),
        ];
        // However the log got into this shape, resolution stays single-valued.
        let occupied = occupied_slots(&events);
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied.get(&slot), Some(&wine_b));
    }

    #[test]
    fn latest_in_slots_ignores_subsequent_out() {
        let wine = Uuid::new_v4();
        let slot = Uuid::new_v4();
        let events = vec![
            event(1, wine, slot, ScanDirection::IN, 0),
            event(2, wine, slot, ScanDirection::OUT, 10),
        ];
        let wines = BTreeSet::from([wine]);
        // The bottle is gone, but its last IN slot still matches.
        assert_eq!(latest_in_slots(&events, &wines), BTreeSet::from([slot]));
    }

    #[test]
    fn latest_in_slots_respects_wine_set() {
        let wine_a = Uuid::new_v4();
        let wine_b = Uuid::new_v4();
        let slot_a = Uuid::new_v4();
        let slot_b = Uuid::new_v4();
        let events = vec![
            event(1, wine_a, slot_a, ScanDirection::IN, 0),
            event(2, wine_b, slot_b, ScanDirection::IN, 5),
        ];
        let wines = BTreeSet::from([wine_a]);
        assert_eq!(latest_in_slots(&events, &wines), BTreeSet::from([slot_a]));
        assert_eq!(latest_in_slots(&events, &BTreeSet::new()), BTreeSet::new());
    }

    #[test]
    fn latest_in_slots_takes_most_recent_in_per_wine() {
        let wine = Uuid::new_v4();
        let slot_a = Uuid::new_v4();
        let slot_b = Uuid::new_v4();
        let events = vec![
            event(1, wine, slot_a, ScanDirection::IN, 0),
            event(2, wine, slot_a, ScanDirection::OUT, 5),
            event(3, wine, slot_b, ScanDirection::IN, 10),
        ];
        let wines = BTreeSet::from([wine]);
        assert_eq!(latest_in_slots(&events, &wines), BTreeSet::from([slot_b]));
    }
}
