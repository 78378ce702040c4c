pub mod confirm;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod query;
pub mod service;

pub use confirm::{BookingRequest, ConcessionSelection, ConfirmedBooking};
pub use engine::HoldReceipt;
pub use error::ReservationError;
pub use query::HeldSeat;
pub use service::BookingService;

#[cfg(test)]
pub(crate) mod testkit;
