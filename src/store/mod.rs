//! Persistence for users, day logs and payroll extras.
//!
//! The engine core never touches storage directly; the request layer reads a
//! snapshot through [`Store`], hands it to the pure calculation functions and
//! writes the results back.

mod locks;
mod memory;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::config::AdminSeed;
use crate::error::EngineResult;
use crate::models::{PayrollExtras, TimeLog, User};

pub use locks::ClockLocks;
pub use memory::MemoryStore;

/// Storage operations the engine relies on.
///
/// Implementations must be safe to share across request handlers. Each call
/// is atomic on its own; callers that need read-modify-write atomicity for a
/// day log serialize through [`ClockLocks`].
pub trait Store: Send + Sync {
    /// Returns every user.
    fn all_users(&self) -> EngineResult<Vec<User>>;

    /// Returns one user, or `None` if no user has that id.
    fn get_user(&self, id: &str) -> EngineResult<Option<User>>;

    /// Inserts or replaces a user.
    ///
    /// Fails with `InvalidUser` on field errors and `PinConflict` when another
    /// user already holds the PIN. A replacement that omits the password
    /// keeps the stored one.
    fn upsert_user(&self, user: User) -> EngineResult<User>;

    /// Deletes a user. Admins cannot be deleted. The user's logs and extras
    /// are left in place.
    fn delete_user(&self, id: &str) -> EngineResult<()>;

    /// Returns every day log.
    fn all_logs(&self) -> EngineResult<Vec<TimeLog>>;

    /// Returns the log for a user on a day.
    fn get_log(&self, user_id: &str, date: NaiveDate) -> EngineResult<Option<TimeLog>>;

    /// Inserts or replaces the log for its `(user_id, date)`.
    fn upsert_log(&self, log: TimeLog) -> EngineResult<()>;

    /// Returns the extras row for a user, if one was saved.
    fn get_extras(&self, user_id: &str) -> EngineResult<Option<PayrollExtras>>;

    /// Returns every saved extras row.
    fn all_extras(&self) -> EngineResult<Vec<PayrollExtras>>;

    /// Inserts or replaces the extras row for its user after validation.
    fn upsert_extras(&self, extras: PayrollExtras) -> EngineResult<()>;
}

/// Seeds the configured administrator into an empty store.
///
/// Returns true if the admin was inserted. A store that already holds any
/// user is left untouched.
pub fn seed_default_admin(
    store: &dyn Store,
    seed: &AdminSeed,
    now: DateTime<Utc>,
) -> EngineResult<bool> {
    if !store.all_users()?.is_empty() {
        return Ok(false);
    }

    store.upsert_user(seed.to_user(now))?;
    info!(admin_id = %seed.id, "Seeded default admin account");
    Ok(true)
}
