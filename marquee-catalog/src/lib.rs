pub mod concessions;
pub mod seating;

pub use concessions::Concession;
pub use seating::{MemorySeatCatalog, SeatCatalog, SeatState, SeatStatus};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("showtime not found: {0}")]
    ShowtimeNotFound(uuid::Uuid),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
