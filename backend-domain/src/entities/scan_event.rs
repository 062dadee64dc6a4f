// Scan event entity
// An immutable fact: a bottle was observed entering or leaving a slot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanDirection {
    IN,
    OUT,
}

impl ScanDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanDirection::IN => "IN",
            ScanDirection::OUT => "OUT",
        }
    }
}

impl From<&str> for ScanDirection {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "IN" => ScanDirection::IN,
            _ => ScanDirection::OUT,
        }
    }
}

/// `seq` is the store-assigned insertion surrogate. Every "latest event"
/// computation orders by `(timestamp, seq)` so that equal timestamps are
/// broken deterministically in favor of the later insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    pub id: Uuid,
    pub seq: i64,
    pub wine_id: Uuid,
    pub slot_id: Uuid,
    pub direction: ScanDirection,
    pub timestamp: DateTime<Utc>,
}

/// Event as handed to the store for appending; id and seq are assigned
/// on insert.
#[derive(Debug, Clone)]
pub struct NewScanEvent {
    pub wine_id: Uuid,
    pub slot_id: Uuid,
    pub direction: ScanDirection,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanEventPayload {
    pub wine_id: Uuid,
    pub slot_id: Uuid,
    pub direction: ScanDirection,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotInRequest {
    pub wine_id: Uuid,
    pub slot_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotOutRequest {
    pub wine_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocateBottleRequest {
    pub wine_id: Uuid,
}
