// Slot color value object
// The rendering vocabulary of the cellar map endpoints

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotColor {
    Highlight,
    Match,
    Available,
    Default,
}

impl SlotColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotColor::Highlight => "highlight",
            SlotColor::Match => "match",
            SlotColor::Available => "available",
            SlotColor::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotColorEntry {
    pub slot_id: Uuid,
    pub color: SlotColor,
}
