use crate::{CatalogError, Concession};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Seat-level status as the catalog records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
    Sold,
    Reserved,
    Locked,
}

impl SeatStatus {
    /// Statuses that permanently exclude a seat from new holds.
    ///
    /// `Locked` is deliberately absent: a locked seat is withheld by an
    /// active reservation lock, and the lock store is the authority on
    /// whether that hold is still in force.
    pub fn is_taken(self) -> bool {
        matches!(
            self,
            SeatStatus::Occupied | SeatStatus::Sold | SeatStatus::Reserved
        )
    }
}

/// One seat's current state within a showtime's seat map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatState {
    pub seat_number: String,
    pub status: SeatStatus,
}

/// Catalog collaborator the reservation core talks to.
///
/// The catalog owns the seat maps and the concession price list; the core
/// only reads statuses, flips them to `Locked` on confirmation, and looks
/// up concession prices.
#[async_trait]
pub trait SeatCatalog: Send + Sync {
    /// Full seat map for a showtime.
    async fn seat_statuses(&self, showtime_id: Uuid) -> Result<Vec<SeatState>, CatalogError>;

    /// Set the status of the named seats. Seats already in `status` are
    /// left as-is, so re-driving the same update is harmless.
    async fn set_seat_status(
        &self,
        showtime_id: Uuid,
        seat_numbers: &[String],
        status: SeatStatus,
    ) -> Result<(), CatalogError>;

    /// Price-list lookup for a concession item.
    async fn concession(&self, concession_id: &str) -> Result<Option<Concession>, CatalogError>;
}

/// In-memory catalog backing tests and single-process deployments.
#[derive(Default)]
pub struct MemorySeatCatalog {
    showtimes: Mutex<HashMap<Uuid, Vec<SeatState>>>,
    concessions: Mutex<HashMap<String, Concession>>,
}

impl MemorySeatCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a showtime whose seats all start out available.
    pub fn add_showtime(&self, showtime_id: Uuid, seat_numbers: &[&str]) {
        let seats = seat_numbers
            .iter()
            .map(|sn| SeatState {
                seat_number: (*sn).to_string(),
                status: SeatStatus::Available,
            })
            .collect();
        self.showtimes.lock().unwrap().insert(showtime_id, seats);
    }

    pub fn add_concession(&self, concession: Concession) {
        self.concessions
            .lock()
            .unwrap()
            .insert(concession.id.clone(), concession);
    }
}

#[async_trait]
impl SeatCatalog for MemorySeatCatalog {
    async fn seat_statuses(&self, showtime_id: Uuid) -> Result<Vec<SeatState>, CatalogError> {
        self.showtimes
            .lock()
            .unwrap()
            .get(&showtime_id)
            .cloned()
            .ok_or(CatalogError::ShowtimeNotFound(showtime_id))
    }

    async fn set_seat_status(
        &self,
        showtime_id: Uuid,
        seat_numbers: &[String],
        status: SeatStatus,
    ) -> Result<(), CatalogError> {
        let mut showtimes = self.showtimes.lock().unwrap();
        let seats = showtimes
            .get_mut(&showtime_id)
            .ok_or(CatalogError::ShowtimeNotFound(showtime_id))?;

        for seat in seats.iter_mut() {
            if seat_numbers.contains(&seat.seat_number) {
                seat.status = status;
            }
        }
        Ok(())
    }

    async fn concession(&self, concession_id: &str) -> Result<Option<Concession>, CatalogError> {
        Ok(self.concessions.lock().unwrap().get(concession_id).cloned())
    }
}
