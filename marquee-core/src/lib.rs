pub mod lock;
pub mod settings;
pub mod sink;
pub mod store;

pub use lock::{LockStatus, SeatLock};
pub use settings::{BusinessRules, Settings};
pub use sink::{Booking, BookingLine, BookingReceipt, BookingSink, MemoryBookingSink, NewBooking, SinkError};
pub use store::{LockStore, MemoryLockStore, StoreError};
