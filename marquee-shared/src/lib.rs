pub mod clock;
pub mod events;
pub mod pii;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::LockEvent;
pub use pii::MaskedEmail;
