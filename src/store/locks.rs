//! Per-(user, date) serialization of clock actions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockKey = (String, NaiveDate);

/// Registry of async locks keyed by `(user_id, date)`.
///
/// Holding the guard for a key makes the read, validate and write of that
/// day log atomic against other clock actions on the same key. Different
/// users and different days never contend.
#[derive(Debug, Clone, Default)]
pub struct ClockLocks {
    locks: Arc<Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>>,
}

impl ClockLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and returns the lock guard for a user's day.
    pub async fn acquire(&self, user_id: &str, date: NaiveDate) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            // Drop entries nobody is holding or waiting on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(
                locks
                    .entry((user_id.to_string(), date))
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Returns true if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_same_key_waits() {
        let locks = ClockLocks::new();
        let guard = locks.acquire("u-1", day(2)).await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.acquire("u-1", day(2)).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_keys_do_not_contend() {
        let locks = ClockLocks::new();
        let _first = locks.acquire("u-1", day(2)).await;

        tokio::time::timeout(Duration::from_secs(1), async {
            let _other_user = locks.acquire("u-2", day(2)).await;
            let _other_day = locks.acquire("u-1", day(3)).await;
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_released_keys_are_pruned() {
        let locks = ClockLocks::new();
        for d in 1..=5 {
            let _guard = locks.acquire("u-1", day(d)).await;
        }
        assert!(locks.len() <= 1);

        let _held = locks.acquire("u-2", day(9)).await;
        assert!(!locks.is_empty());
    }
}
