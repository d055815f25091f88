//! In-memory [`Store`] implementation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollExtras, TimeLog, User};

use super::Store;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<String, User>,
    logs: BTreeMap<(String, NaiveDate), TimeLog>,
    extras: BTreeMap<String, PayrollExtras>,
}

/// A [`Store`] backed by ordered maps behind a single lock.
///
/// Users and extras are keyed by user id, logs by `(user_id, date)`, so
/// listings come back in key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn all_users(&self) -> EngineResult<Vec<User>> {
        Ok(self.tables.read().users.values().cloned().collect())
    }

    fn get_user(&self, id: &str) -> EngineResult<Option<User>> {
        Ok(self.tables.read().users.get(id).cloned())
    }

    fn upsert_user(&self, mut user: User) -> EngineResult<User> {
        user.validate()?;

        let mut tables = self.tables.write();
        if tables
            .users
            .values()
            .any(|other| other.id != user.id && other.pin == user.pin)
        {
            return Err(EngineError::PinConflict { pin: user.pin });
        }

        if user.password.is_none() {
            user.password = tables
                .users
                .get(&user.id)
                .and_then(|existing| existing.password.clone());
        }

        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn delete_user(&self, id: &str) -> EngineResult<()> {
        let mut tables = self.tables.write();
        let is_admin = match tables.users.get(id) {
            Some(user) => user.is_admin(),
            None => return Err(EngineError::UserNotFound { id: id.to_string() }),
        };
        if is_admin {
            return Err(EngineError::AdminDeletion { id: id.to_string() });
        }

        tables.users.remove(id);
        Ok(())
    }

    fn all_logs(&self) -> EngineResult<Vec<TimeLog>> {
        Ok(self.tables.read().logs.values().cloned().collect())
    }

    fn get_log(&self, user_id: &str, date: NaiveDate) -> EngineResult<Option<TimeLog>> {
        Ok(self
            .tables
            .read()
            .logs
            .get(&(user_id.to_string(), date))
            .cloned())
    }

    fn upsert_log(&self, log: TimeLog) -> EngineResult<()> {
        let key = (log.user_id.clone(), log.date);
        self.tables.write().logs.insert(key, log);
        Ok(())
    }

    fn get_extras(&self, user_id: &str) -> EngineResult<Option<PayrollExtras>> {
        Ok(self.tables.read().extras.get(user_id).cloned())
    }

    fn all_extras(&self) -> EngineResult<Vec<PayrollExtras>> {
        Ok(self.tables.read().extras.values().cloned().collect())
    }

    fn upsert_extras(&self, extras: PayrollExtras) -> EngineResult<()> {
        extras.validate()?;
        self.tables.write().extras.insert(extras.user_id.clone(), extras);
        Ok(())
    }
}
