use crate::lock::SeatLock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_shared::MaskedEmail;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store refused a new lock because another in-force lock already
    /// holds one or more of its seats.
    #[error("seats already locked: {}", conflicting_seats.join(", "))]
    Conflict { conflicting_seats: Vec<String> },

    /// Unknown lock id, or a lock that does not match the caller's filter
    /// (wrong owner, already inactive). The two cases are indistinguishable
    /// on purpose.
    #[error("lock not found: {0}")]
    NotFound(Uuid),

    #[error("lock store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for reservation locks.
///
/// `create` is the safety net for the engine's read-then-write conflict
/// check: implementations must re-validate seat disjointness atomically
/// with the insert, so two racing reservations for overlapping seats can
/// never both land.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Atomically persist a new lock, rejecting it when any of its seats
    /// overlaps an in-force lock for the same showtime.
    async fn create(&self, lock: SeatLock, now: DateTime<Utc>) -> Result<(), StoreError>;

    async fn get(&self, lock_id: Uuid) -> Result<Option<SeatLock>, StoreError>;

    /// Every active, unexpired lock for a showtime.
    async fn find_in_force(
        &self,
        showtime_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<SeatLock>, StoreError>;

    /// Flip `active` off on the caller's own still-active lock, returning
    /// the released lock. `NotFound` covers unknown ids, foreign owners
    /// and already-released locks alike.
    async fn deactivate(&self, lock_id: Uuid, user_id: &str) -> Result<SeatLock, StoreError>;

    /// Deactivate the owner's expired-but-still-active locks for a
    /// showtime. Pure garbage collection; expiry already hides these rows
    /// from every read path. Returns how many rows were flipped.
    async fn deactivate_stale(
        &self,
        showtime_id: Uuid,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError>;

    /// Record a confirmation: status becomes confirmed, `active` stays
    /// true, and the expiry is re-armed to `expires_at`.
    async fn mark_confirmed(
        &self,
        lock_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<SeatLock, StoreError>;
}

/// In-memory lock store.
///
/// A single mutex serializes every write, which doubles as the per-showtime
/// write serialization the disjointness invariant needs. Rows are never
/// removed; released and expired locks stay behind for audit.
#[derive(Default)]
pub struct MemoryLockStore {
    locks: Mutex<HashMap<Uuid, SeatLock>>,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lock ever taken for a showtime, in no particular order,
    /// including released and expired ones.
    pub fn history(&self, showtime_id: Uuid) -> Vec<SeatLock> {
        self.locks
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.showtime_id == showtime_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn create(&self, lock: SeatLock, now: DateTime<Utc>) -> Result<(), StoreError> {
        let mut locks = self.locks.lock().unwrap();

        // Re-check disjointness under the store mutex. The engine's own
        // conflict read happens outside any critical section and can race.
        let conflicting: BTreeSet<String> = locks
            .values()
            .filter(|l| l.showtime_id == lock.showtime_id && l.in_force(now))
            .flat_map(|l| l.overlap(&lock.seat_numbers))
            .map(str::to_string)
            .collect();

        if !conflicting.is_empty() {
            return Err(StoreError::Conflict {
                conflicting_seats: conflicting.into_iter().collect(),
            });
        }

        info!(
            lock_id = %lock.id,
            showtime_id = %lock.showtime_id,
            seats = ?lock.seat_numbers,
            holder = %MaskedEmail::new(lock.user_email.as_str()),
            "seat lock created"
        );
        locks.insert(lock.id, lock);
        Ok(())
    }

    async fn get(&self, lock_id: Uuid) -> Result<Option<SeatLock>, StoreError> {
        Ok(self.locks.lock().unwrap().get(&lock_id).cloned())
    }

    async fn find_in_force(
        &self,
        showtime_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<SeatLock>, StoreError> {
        Ok(self
            .locks
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.showtime_id == showtime_id && l.in_force(now))
            .cloned()
            .collect())
    }

    async fn deactivate(&self, lock_id: Uuid, user_id: &str) -> Result<SeatLock, StoreError> {
        let mut locks = self.locks.lock().unwrap();
        match locks.get_mut(&lock_id) {
            Some(lock) if lock.user_id == user_id && lock.active => {
                lock.deactivate();
                info!(lock_id = %lock_id, "seat lock released");
                Ok(lock.clone())
            }
            _ => Err(StoreError::NotFound(lock_id)),
        }
    }

    async fn deactivate_stale(
        &self,
        showtime_id: Uuid,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let mut locks = self.locks.lock().unwrap();
        let mut flipped = 0;
        for lock in locks.values_mut() {
            if lock.showtime_id == showtime_id
                && lock.user_id == user_id
                && lock.active
                && lock.is_expired(now)
            {
                lock.deactivate();
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn mark_confirmed(
        &self,
        lock_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<SeatLock, StoreError> {
        let mut locks = self.locks.lock().unwrap();
        let lock = locks
            .get_mut(&lock_id)
            .ok_or(StoreError::NotFound(lock_id))?;
        lock.confirm(expires_at);
        info!(lock_id = %lock_id, expires_at = %expires_at, "seat lock confirmed and re-armed");
        Ok(lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn lock_for(
        showtime_id: Uuid,
        seats: &[&str],
        user_id: &str,
        now: DateTime<Utc>,
    ) -> SeatLock {
        SeatLock::new(
            showtime_id,
            seats.iter().map(|s| s.to_string()).collect(),
            user_id,
            format!("{user_id}@example.com"),
            now,
            Duration::minutes(10),
        )
    }

    #[tokio::test]
    async fn overlapping_create_is_rejected_with_shared_seats() {
        let store = MemoryLockStore::new();
        let showtime_id = Uuid::new_v4();
        let now = Utc::now();

        store
            .create(lock_for(showtime_id, &["A1", "A2"], "u1", now), now)
            .await
            .unwrap();

        let err = store
            .create(lock_for(showtime_id, &["A2", "A3"], "u2", now), now)
            .await
            .unwrap_err();

        match err {
            StoreError::Conflict { conflicting_seats } => {
                assert_eq!(conflicting_seats, vec!["A2".to_string()]);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn disjoint_locks_coexist_within_a_showtime() {
        let store = MemoryLockStore::new();
        let showtime_id = Uuid::new_v4();
        let now = Utc::now();

        store
            .create(lock_for(showtime_id, &["A1"], "u1", now), now)
            .await
            .unwrap();
        store
            .create(lock_for(showtime_id, &["A2"], "u2", now), now)
            .await
            .unwrap();

        assert_eq!(store.find_in_force(showtime_id, now).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn expired_lock_no_longer_blocks_creation() {
        let store = MemoryLockStore::new();
        let showtime_id = Uuid::new_v4();
        let now = Utc::now();

        store
            .create(lock_for(showtime_id, &["B1"], "u1", now), now)
            .await
            .unwrap();

        let later = now + Duration::minutes(10);
        store
            .create(lock_for(showtime_id, &["B1"], "u2", later), later)
            .await
            .unwrap();

        // Only the second lock is still visible.
        let in_force = store.find_in_force(showtime_id, later).await.unwrap();
        assert_eq!(in_force.len(), 1);
        assert_eq!(in_force[0].user_id, "u2");
    }

    #[tokio::test]
    async fn deactivate_folds_foreign_and_missing_into_not_found() {
        let store = MemoryLockStore::new();
        let showtime_id = Uuid::new_v4();
        let now = Utc::now();
        let lock = lock_for(showtime_id, &["C1"], "u1", now);
        let lock_id = lock.id;
        store.create(lock, now).await.unwrap();

        // Foreign owner.
        assert!(matches!(
            store.deactivate(lock_id, "u2").await,
            Err(StoreError::NotFound(_))
        ));

        // Owner succeeds once.
        store.deactivate(lock_id, "u1").await.unwrap();

        // Second release is NotFound, not a silent success.
        assert!(matches!(
            store.deactivate(lock_id, "u1").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn stale_cleanup_only_touches_the_owners_expired_locks() {
        let store = MemoryLockStore::new();
        let showtime_id = Uuid::new_v4();
        let now = Utc::now();

        store
            .create(lock_for(showtime_id, &["D1"], "u1", now), now)
            .await
            .unwrap();
        store
            .create(lock_for(showtime_id, &["D2"], "u2", now), now)
            .await
            .unwrap();

        let later = now + Duration::minutes(11);
        let flipped = store.deactivate_stale(showtime_id, "u1", later).await.unwrap();
        assert_eq!(flipped, 1);

        // u2's lock expired too but was not touched; audit history keeps both.
        let history = store.history(showtime_id);
        assert_eq!(history.len(), 2);
        let u2 = history.iter().find(|l| l.user_id == "u2").unwrap();
        assert!(u2.active);
    }
}
