use crate::error::ReservationError;
use crate::service::BookingService;
use marquee_shared::events::LockReleasedEvent;
use marquee_shared::LockEvent;
use tracing::info;
use uuid::Uuid;

impl BookingService {
    /// Release the caller's own active lock.
    ///
    /// Unknown ids, foreign locks and already-released locks all come back
    /// as `NotFound`; nothing about other owners' locks leaks through the
    /// error. A second release of the same lock is therefore `NotFound`,
    /// never a repeated success.
    pub async fn release(&self, lock_id: Uuid, user_id: &str) -> Result<(), ReservationError> {
        if user_id.trim().is_empty() {
            return Err(ReservationError::InvalidInput(
                "user id is required".to_string(),
            ));
        }

        let lock = self.store.deactivate(lock_id, user_id).await?;

        info!(lock_id = %lock_id, showtime_id = %lock.showtime_id, "hold released");
        self.emit(LockEvent::Released(LockReleasedEvent {
            lock_id,
            showtime_id: lock.showtime_id,
            seat_numbers: lock.seat_numbers,
        }));
        Ok(())
    }
}
