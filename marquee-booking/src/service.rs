use chrono::Duration;
use marquee_catalog::SeatCatalog;
use marquee_core::{BookingSink, BusinessRules, LockStore};
use marquee_shared::{Clock, LockEvent};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Facade over the reservation engine, lock query service, lifecycle
/// manager and confirmation coordinator. One instance is shared across all
/// concurrent callers; every operation reads "now" exactly once from the
/// injected clock.
pub struct BookingService {
    pub(crate) store: Arc<dyn LockStore>,
    pub(crate) catalog: Arc<dyn SeatCatalog>,
    pub(crate) sink: Arc<dyn BookingSink>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) rules: BusinessRules,
    pub(crate) events: Option<broadcast::Sender<LockEvent>>,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn LockStore>,
        catalog: Arc<dyn SeatCatalog>,
        sink: Arc<dyn BookingSink>,
        clock: Arc<dyn Clock>,
        rules: BusinessRules,
    ) -> Self {
        Self {
            store,
            catalog,
            sink,
            clock,
            rules,
            events: None,
        }
    }

    /// Attach a broadcast channel; lock transitions are fanned out to it
    /// for live seat-map consumers.
    pub fn with_events(mut self, events: broadcast::Sender<LockEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub(crate) fn hold_ttl(&self) -> Duration {
        Duration::seconds(self.rules.hold_ttl_seconds as i64)
    }

    /// Fire-and-forget fan-out. A channel with no subscribers is fine.
    pub(crate) fn emit(&self, event: LockEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
