use crate::error::ReservationError;
use crate::service::BookingService;
use chrono::{DateTime, Utc};
use marquee_catalog::{CatalogError, SeatStatus};
use marquee_core::{BookingLine, NewBooking};
use marquee_shared::events::BookingConfirmedEvent;
use marquee_shared::LockEvent;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Checkout payload for converting a hold into a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    /// Ticket total as priced by the caller, in minor units.
    pub base_total: i64,
    #[serde(default)]
    pub concessions: Vec<ConcessionSelection>,
    pub payment_method: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConcessionSelection {
    pub id: String,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Outcome of a successful confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedBooking {
    pub booking_id: Uuid,
    pub booking_code: String,
    pub qr_token: String,
    pub lock_id: Uuid,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
    pub concessions: Vec<BookingLine>,
    pub grand_total: i64,
    /// The lock's refreshed expiry; the seats stay withheld until then.
    pub lock_expires_at: DateTime<Utc>,
}

impl BookingService {
    /// Convert an active hold into a permanent booking.
    ///
    /// Validity is judged on the lock's `active` flag alone, matching the
    /// lock's lifecycle convention: `active` is the authoritative
    /// held/released state, while `expires_at` only governs visibility to
    /// other reservers. After the sink write the seats are re-stamped
    /// `locked` at the catalog and the lock's TTL is re-armed, so the
    /// seats do not become contestable the moment the original hold would
    /// have lapsed.
    ///
    /// The sink write, the catalog update and the lock extension are three
    /// separate stores with no shared transaction. Failures in between
    /// leave the booking persisted; the catalog step is idempotent so a
    /// retry of the whole call (or an operator re-drive) converges.
    pub async fn confirm(
        &self,
        lock_id: Uuid,
        user_id: &str,
        request: BookingRequest,
    ) -> Result<ConfirmedBooking, ReservationError> {
        if user_id.trim().is_empty() {
            return Err(ReservationError::InvalidInput(
                "user id is required".to_string(),
            ));
        }
        if request.base_total < 0 {
            return Err(ReservationError::InvalidInput(
                "base total must not be negative".to_string(),
            ));
        }

        let now = self.clock.now();

        let lock = self
            .store
            .get(lock_id)
            .await?
            .ok_or(ReservationError::NotFound(lock_id))?;
        if !lock.active {
            return Err(ReservationError::Expired(lock_id));
        }

        // Price the concession selections. Items the catalog no longer
        // knows are dropped, not failed; the seat purchase must not die on
        // a vanished combo.
        let mut lines: Vec<BookingLine> = Vec::with_capacity(request.concessions.len());
        for selection in &request.concessions {
            match self.catalog.concession(&selection.id).await? {
                Some(item) => {
                    let quantity = selection.quantity.filter(|q| *q > 0).unwrap_or(1);
                    lines.push(BookingLine {
                        concession_id: item.id,
                        name: item.name,
                        unit_price: item.unit_price,
                        quantity,
                        line_total: item.unit_price * i64::from(quantity),
                    });
                }
                None => {
                    debug!(concession_id = %selection.id, "unknown concession dropped");
                }
            }
        }
        let grand_total: i64 =
            request.base_total + lines.iter().map(|l| l.line_total).sum::<i64>();

        // The lock, not the request, says which showtime and seats were
        // actually reserved.
        let receipt = self
            .sink
            .create_booking(NewBooking {
                user_id: user_id.to_string(),
                user_email: lock.user_email.clone(),
                showtime_id: lock.showtime_id,
                seat_numbers: lock.seat_numbers.clone(),
                concessions: lines.clone(),
                base_total: request.base_total,
                grand_total,
                payment_method: request.payment_method.clone(),
            })
            .await?;

        // Withhold the seats at the catalog without touching availability
        // counters; that accounting stays with the catalog owner. A
        // showtime the catalog has meanwhile dropped is not an error here,
        // the booking is already durable.
        match self
            .catalog
            .set_seat_status(lock.showtime_id, &lock.seat_numbers, SeatStatus::Locked)
            .await
        {
            Ok(()) | Err(CatalogError::ShowtimeNotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }

        let confirmed = self
            .store
            .mark_confirmed(lock_id, now + self.hold_ttl())
            .await?;

        info!(
            booking_id = %receipt.booking_id,
            lock_id = %lock_id,
            grand_total,
            "booking confirmed"
        );
        self.emit(LockEvent::Confirmed(BookingConfirmedEvent {
            booking_id: receipt.booking_id,
            lock_id,
            showtime_id: lock.showtime_id,
            seat_numbers: lock.seat_numbers.clone(),
            grand_total,
            timestamp: now.timestamp(),
        }));

        Ok(ConfirmedBooking {
            booking_id: receipt.booking_id,
            booking_code: receipt.booking_code,
            qr_token: receipt.qr_token,
            lock_id,
            showtime_id: lock.showtime_id,
            seat_numbers: lock.seat_numbers,
            concessions: lines,
            grand_total,
            lock_expires_at: confirmed.expires_at,
        })
    }
}
