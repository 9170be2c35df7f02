use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Available,
    Held,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatusRecord {
    pub event_id: String,
    pub game_id: String,
    pub status: SlotStatus,
    pub held_by: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSlotStatusRequest {
    pub status: SlotStatus,
    #[serde(default)]
    pub held_by: Option<String>,
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}
