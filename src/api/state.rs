//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::{ClockLocks, Store};

/// Shared application state.
///
/// Contains the resources shared across all request handlers: the backing
/// store and the clock lock registry.
#[derive(Clone)]
pub struct AppState {
    /// Users, logs and extras.
    store: Arc<dyn Store>,
    /// Per-(user, date) clock serialization.
    clock_locks: ClockLocks,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            clock_locks: ClockLocks::new(),
        }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Returns the clock lock registry.
    pub fn clock_locks(&self) -> &ClockLocks {
        &self.clock_locks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_store() {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        let clone = state.clone();
        state
            .store()
            .upsert_extras(crate::models::PayrollExtras::empty("u-1"))
            .unwrap();
        assert!(clone.store().get_extras("u-1").unwrap().is_some());
    }
}
