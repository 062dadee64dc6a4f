// Derived occupancy states, never persisted

use serde::Serialize;
use uuid::Uuid;

/// Where a given bottle currently is, derived from its latest scan event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BottleLocation {
    Absent,
    InSlot(Uuid),
}

/// Whether a given slot currently holds a bottle, derived from the
/// latest scan event touching the slot, across all wines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotOccupancy {
    Free,
    Occupied(Uuid),
}
