use crate::error::ReservationError;
use crate::service::BookingService;
use chrono::{DateTime, Utc};
use marquee_core::SeatLock;
use marquee_shared::events::SeatsHeldEvent;
use marquee_shared::{LockEvent, MaskedEmail};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};
use uuid::Uuid;

/// What the caller gets back for a fresh hold.
#[derive(Debug, Clone, Serialize)]
pub struct HoldReceipt {
    pub lock_id: Uuid,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
    pub expires_at: DateTime<Utc>,
    /// Seconds until the hold lapses, relative to the request's own "now".
    pub expires_in: i64,
}

impl BookingService {
    /// Reserve a set of seats for one showtime.
    ///
    /// The conflict set is the union of catalog-level taken seats
    /// (occupied/sold/reserved) and seats under someone else's in-force
    /// lock. The read here is advisory only; the store re-validates
    /// disjointness atomically with the insert, so a racing caller loses
    /// there even if both passed this check.
    pub async fn reserve(
        &self,
        showtime_id: Uuid,
        seat_numbers: Vec<String>,
        user_id: &str,
        user_email: &str,
    ) -> Result<HoldReceipt, ReservationError> {
        if seat_numbers.is_empty() {
            return Err(ReservationError::InvalidInput(
                "at least one seat is required".to_string(),
            ));
        }
        if user_id.trim().is_empty() || user_email.trim().is_empty() {
            return Err(ReservationError::InvalidInput(
                "user id and email are required".to_string(),
            ));
        }
        if seat_numbers.iter().any(|sn| sn.trim().is_empty()) {
            return Err(ReservationError::InvalidInput(
                "seat numbers must be non-empty".to_string(),
            ));
        }

        // Duplicate seat ids in one request collapse to a set.
        let mut seats: Vec<String> = Vec::with_capacity(seat_numbers.len());
        for sn in seat_numbers {
            if !seats.contains(&sn) {
                seats.push(sn);
            }
        }

        let now = self.clock.now();

        let seat_map = self.catalog.seat_statuses(showtime_id).await?;
        let taken: BTreeSet<String> = seat_map
            .iter()
            .filter(|s| seats.contains(&s.seat_number) && s.status.is_taken())
            .map(|s| s.seat_number.clone())
            .collect();

        let held: BTreeSet<String> = self
            .store
            .find_in_force(showtime_id, now)
            .await?
            .iter()
            .flat_map(|l| l.overlap(&seats))
            .map(str::to_string)
            .collect();

        let conflicting: Vec<String> = taken.union(&held).cloned().collect();
        if !conflicting.is_empty() {
            warn!(
                showtime_id = %showtime_id,
                seats = ?conflicting,
                "reservation refused, seats contended"
            );
            return Err(ReservationError::Conflict {
                conflicting_seats: conflicting,
            });
        }

        // Courtesy sweep of the caller's own expired holds. Correctness
        // never depends on it; expiry already hides those rows.
        self.store
            .deactivate_stale(showtime_id, user_id, now)
            .await?;

        let lock = SeatLock::new(showtime_id, seats, user_id, user_email, now, self.hold_ttl());
        self.store.create(lock.clone(), now).await?;

        info!(
            lock_id = %lock.id,
            showtime_id = %showtime_id,
            holder = %MaskedEmail::new(user_email),
            "seats held"
        );
        self.emit(LockEvent::SeatsHeld(SeatsHeldEvent {
            lock_id: lock.id,
            showtime_id,
            seat_numbers: lock.seat_numbers.clone(),
            user_id: lock.user_id.clone(),
            expires_at: lock.expires_at,
        }));

        Ok(HoldReceipt {
            lock_id: lock.id,
            showtime_id,
            seat_numbers: lock.seat_numbers,
            expires_at: lock.expires_at,
            expires_in: (lock.expires_at - now).num_seconds(),
        })
    }
}
