use crate::error::ReservationError;
use crate::service::BookingService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Per-seat view of live contention, one entry per held seat.
#[derive(Debug, Clone, Serialize)]
pub struct HeldSeat {
    pub seat_number: String,
    pub user_id: String,
    pub user_email: String,
    pub expires_at: DateTime<Utc>,
}

impl BookingService {
    /// Flatten every in-force lock for a showtime into per-seat entries,
    /// for rendering a live seat map. Read-only; order follows the
    /// underlying locks.
    pub async fn locked_seats(
        &self,
        showtime_id: Uuid,
    ) -> Result<Vec<HeldSeat>, ReservationError> {
        let now = self.clock.now();
        let locks = self.store.find_in_force(showtime_id, now).await?;

        Ok(locks
            .into_iter()
            .flat_map(|lock| {
                lock.seat_numbers
                    .iter()
                    .map(|sn| HeldSeat {
                        seat_number: sn.clone(),
                        user_id: lock.user_id.clone(),
                        user_email: lock.user_email.clone(),
                        expires_at: lock.expires_at,
                    })
                    .collect::<Vec<_>>()
            })
            .collect())
    }
}
