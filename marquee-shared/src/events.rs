use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SeatsHeldEvent {
    pub lock_id: Uuid,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LockReleasedEvent {
    pub lock_id: Uuid,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BookingConfirmedEvent {
    pub booking_id: Uuid,
    pub lock_id: Uuid,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
    pub grand_total: i64,
    pub timestamp: i64,
}

/// Fan-out payload for live seat-map consumers.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LockEvent {
    SeatsHeld(SeatsHeldEvent),
    Released(LockReleasedEvent),
    Confirmed(BookingConfirmedEvent),
}

impl LockEvent {
    pub fn showtime_id(&self) -> Uuid {
        match self {
            LockEvent::SeatsHeld(e) => e.showtime_id,
            LockEvent::Released(e) => e.showtime_id,
            LockEvent::Confirmed(e) => e.showtime_id,
        }
    }
}
