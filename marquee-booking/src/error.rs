use marquee_catalog::CatalogError;
use marquee_core::{SinkError, StoreError};
use uuid::Uuid;

/// The error taxonomy every boundary operation reports.
///
/// `InvalidInput` means the caller must fix the request; `Conflict` names
/// the contended seats so the caller can pick others; `NotFound` and
/// `Expired` are terminal for the lock in question; `Dependency` marks a
/// collaborator failure that left no partial lock behind and is safe to
/// retry wholesale.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("seats already held or taken: {}", conflicting_seats.join(", "))]
    Conflict { conflicting_seats: Vec<String> },

    #[error("lock not found: {0}")]
    NotFound(Uuid),

    #[error("lock is no longer valid: {0}")]
    Expired(Uuid),

    #[error("dependency failure: {0}")]
    Dependency(String),
}

impl From<StoreError> for ReservationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { conflicting_seats } => {
                ReservationError::Conflict { conflicting_seats }
            }
            StoreError::NotFound(id) => ReservationError::NotFound(id),
            StoreError::Unavailable(msg) => ReservationError::Dependency(msg),
        }
    }
}

impl From<CatalogError> for ReservationError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ShowtimeNotFound(id) => ReservationError::NotFound(id),
            CatalogError::Unavailable(msg) => ReservationError::Dependency(msg),
        }
    }
}

impl From<SinkError> for ReservationError {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::Rejected(msg) => ReservationError::InvalidInput(msg),
            SinkError::Unavailable(msg) => ReservationError::Dependency(msg),
        }
    }
}
