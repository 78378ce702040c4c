use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a lock sits in its lifecycle.
///
/// `Confirmed` does not end the lock: a confirmed lock stays active under
/// its refreshed expiry so the seats remain withheld after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockStatus {
    Held,
    Confirmed,
}

/// A time-bounded claim on a set of seats within one showtime.
///
/// Two flags govern a lock's fate and they are deliberately independent:
/// `active` is the explicit tombstone flipped by a release, while
/// `expires_at` controls visibility to other reservers. An expired lock
/// simply stops being seen by the read paths; nothing ever has to flip
/// `active` for expiry to take effect. Locks are never deleted, so the
/// store keeps an audit trail of every hold ever taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatLock {
    pub id: Uuid,
    pub showtime_id: Uuid,
    pub seat_numbers: Vec<String>,
    pub user_id: String,
    pub user_email: String,
    pub status: LockStatus,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SeatLock {
    pub fn new(
        showtime_id: Uuid,
        seat_numbers: Vec<String>,
        user_id: impl Into<String>,
        user_email: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            showtime_id,
            seat_numbers,
            user_id: user_id.into(),
            user_email: user_email.into(),
            status: LockStatus::Held,
            active: true,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether this lock currently withholds its seats from other reservers.
    pub fn in_force(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired(now)
    }

    /// Seats shared between this lock and `requested`.
    pub fn overlap<'a>(&'a self, requested: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        self.seat_numbers
            .iter()
            .filter(move |sn| requested.contains(sn))
            .map(String::as_str)
    }

    /// Re-arm the lock after a successful confirmation.
    pub fn confirm(&mut self, new_expiry: DateTime<Utc>) {
        self.status = LockStatus::Confirmed;
        self.active = true;
        self.expires_at = new_expiry;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_at(now: DateTime<Utc>) -> SeatLock {
        SeatLock::new(
            Uuid::new_v4(),
            vec!["A1".to_string(), "A2".to_string()],
            "user-1",
            "user-1@example.com",
            now,
            Duration::minutes(10),
        )
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let lock = lock_at(now);

        assert!(lock.in_force(now + Duration::minutes(10) - Duration::seconds(1)));
        // Dead exactly at expires_at, not a second later.
        assert!(lock.is_expired(now + Duration::minutes(10)));
        assert!(!lock.in_force(now + Duration::minutes(10)));
    }

    #[test]
    fn released_lock_is_not_in_force_even_before_expiry() {
        let now = Utc::now();
        let mut lock = lock_at(now);
        lock.deactivate();

        assert!(!lock.in_force(now));
        assert!(!lock.is_expired(now));
    }

    #[test]
    fn confirm_refreshes_expiry_and_keeps_lock_active() {
        let now = Utc::now();
        let mut lock = lock_at(now);
        let later = now + Duration::minutes(9);

        lock.confirm(later + Duration::minutes(10));

        assert_eq!(lock.status, LockStatus::Confirmed);
        assert!(lock.in_force(later + Duration::minutes(5)));
    }

    #[test]
    fn overlap_reports_shared_seats_only() {
        let lock = lock_at(Utc::now());
        let requested = vec!["A2".to_string(), "A3".to_string()];

        let shared: Vec<&str> = lock.overlap(&requested).collect();
        assert_eq!(shared, vec!["A2"]);
    }
}
