use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink refused the payload. Not retryable as-is.
    #[error("booking rejected: {0}")]
    Rejected(String),

    #[error("booking sink unavailable: {0}")]
    Unavailable(String),
}

/// One priced concession line on a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingLine {
    pub concession_id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub line_total: i64,
}

/// Payload handed to the finalize sink when a hold converts to a booking.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub user_id: String,
    pub user_email: String,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
    pub concessions: Vec<BookingLine>,
    pub base_total: i64,
    pub grand_total: i64,
    pub payment_method: String,
}

/// What the sink reports back once the booking is durable.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub booking_id: Uuid,
    pub booking_code: String,
    pub qr_token: String,
}

/// The permanent record as the in-memory sink retains it.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub booking_code: String,
    pub qr_token: String,
    pub user_id: String,
    pub user_email: String,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
    pub concessions: Vec<BookingLine>,
    pub grand_total: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub booking_status: String,
    pub created_at: DateTime<Utc>,
}

/// Write-once finalize sink. The confirmation step calls this exactly once
/// per successful checkout; everything else about the booking record is the
/// sink owner's business.
#[async_trait]
pub trait BookingSink: Send + Sync {
    async fn create_booking(&self, booking: NewBooking) -> Result<BookingReceipt, SinkError>;
}

/// In-memory sink for tests and single-process deployments.
#[derive(Default)]
pub struct MemoryBookingSink {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryBookingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingSink for MemoryBookingSink {
    async fn create_booking(&self, booking: NewBooking) -> Result<BookingReceipt, SinkError> {
        if booking.seat_numbers.is_empty() {
            return Err(SinkError::Rejected("booking has no seats".to_string()));
        }
        if booking.grand_total < 0 {
            return Err(SinkError::Rejected("negative grand total".to_string()));
        }

        let booking_id = Uuid::new_v4();
        let receipt = BookingReceipt {
            booking_id,
            booking_code: format!("BK-{}", booking_id.simple()),
            qr_token: format!("QR-{}", booking_id.simple()),
        };

        let record = Booking {
            id: booking_id,
            booking_code: receipt.booking_code.clone(),
            qr_token: receipt.qr_token.clone(),
            user_id: booking.user_id,
            user_email: booking.user_email,
            showtime_id: booking.showtime_id,
            seat_numbers: booking.seat_numbers,
            concessions: booking.concessions,
            grand_total: booking.grand_total,
            payment_method: booking.payment_method,
            payment_status: "paid".to_string(),
            booking_status: "confirmed".to_string(),
            created_at: Utc::now(),
        };

        info!(booking_id = %booking_id, code = %record.booking_code, "booking persisted");
        self.bookings.lock().unwrap().push(record);
        Ok(receipt)
    }
}
