// Cellar slot entity
// A physical storage location holding at most one bottle at a time

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellarSlot {
    pub id: Uuid,
    pub rack: i32,
    pub row: String,
    /// Address of the LED node that marks this slot on the physical rack.
    pub led_node_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CellarSlotPayload {
    pub rack: i32,
    pub row: String,
    pub led_node_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedState {
    Occupied,
    Free,
}

impl LedState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedState::Occupied => "occupied",
            LedState::Free => "free",
        }
    }
}

/// The signal handed to the notification hook after a slotting mutation.
#[derive(Debug, Clone, Serialize)]
pub struct SlotLedChange {
    pub slot_id: Uuid,
    pub led_node_id: String,
    pub state: LedState,
}
