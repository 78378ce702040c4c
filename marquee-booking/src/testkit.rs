use crate::service::BookingService;
use chrono::Utc;
use marquee_catalog::MemorySeatCatalog;
use marquee_core::{BusinessRules, MemoryBookingSink, MemoryLockStore};
use marquee_shared::ManualClock;
use std::sync::Arc;
use uuid::Uuid;

pub(crate) struct TestRig {
    pub service: BookingService,
    pub store: Arc<MemoryLockStore>,
    pub catalog: Arc<MemorySeatCatalog>,
    pub sink: Arc<MemoryBookingSink>,
    pub clock: Arc<ManualClock>,
    pub showtime_id: Uuid,
}

/// Service wired to in-memory collaborators, a manual clock and one
/// showtime seeded with the given seats.
pub(crate) fn rig_with_seats(seat_numbers: &[&str]) -> TestRig {
    let store = Arc::new(MemoryLockStore::new());
    let catalog = Arc::new(MemorySeatCatalog::new());
    let sink = Arc::new(MemoryBookingSink::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let showtime_id = Uuid::new_v4();
    catalog.add_showtime(showtime_id, seat_numbers);

    let service = BookingService::new(
        store.clone(),
        catalog.clone(),
        sink.clone(),
        clock.clone(),
        BusinessRules::default(),
    );

    TestRig {
        service,
        store,
        catalog,
        sink,
        clock,
        showtime_id,
    }
}
