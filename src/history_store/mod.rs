// Per-container bounded snapshot history. Every mutation and read goes through one lock;
// readers always get an owned copy, never a view into the live buffer.

mod buffer;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::RawSnapshot;

use buffer::ContainerHistory;

/// Capacity used until the render side reports a display width.
pub const DEFAULT_CAPACITY: usize = 120;

/// Result of [`HistoryStore::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Stored,
    /// Same read timestamp as the last stored entry; the source has not advanced.
    DuplicateIgnored,
}

#[derive(Debug)]
struct StoreState {
    histories: HashMap<String, ContainerHistory>,
    capacity: usize,
}

#[derive(Debug)]
pub struct HistoryStore {
    state: RwLock<StoreState>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: RwLock::new(StoreState {
                histories: HashMap::new(),
                capacity: capacity.max(1),
            }),
        }
    }

    // A panic elsewhere must not take the render loop down with it.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `snapshot` to the history of `container_id`, creating it on first sight.
    pub fn append(&self, container_id: &str, snapshot: RawSnapshot) -> AppendOutcome {
        let mut state = self.write();
        let capacity = state.capacity;
        state
            .histories
            .entry(container_id.to_string())
            .or_insert_with(ContainerHistory::new)
            .push(snapshot, capacity)
    }

    /// Owned copy of the history, oldest first. Empty for unknown containers.
    pub fn snapshots_for(&self, container_id: &str) -> Vec<RawSnapshot> {
        self.read()
            .histories
            .get(container_id)
            .map(ContainerHistory::to_vec)
            .unwrap_or_default()
    }

    /// New eviction bound, never below 1. Existing buffers shrink on their next append.
    pub fn set_capacity(&self, capacity: usize) {
        self.write().capacity = capacity.max(1);
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity
    }

    /// Creates an empty history if none exists. Returns true when one was created.
    pub fn track(&self, container_id: &str) -> bool {
        let mut state = self.write();
        if state.histories.contains_key(container_id) {
            return false;
        }
        state
            .histories
            .insert(container_id.to_string(), ContainerHistory::new());
        true
    }

    /// Drops the whole history of `container_id`. Returns true when one existed.
    pub fn evict(&self, container_id: &str) -> bool {
        self.write().histories.remove(container_id).is_some()
    }

    pub fn contains(&self, container_id: &str) -> bool {
        self.read().histories.contains_key(container_id)
    }

    pub fn len(&self, container_id: &str) -> usize {
        self.read()
            .histories
            .get(container_id)
            .map_or(0, ContainerHistory::len)
    }

    /// Ids with a history, in no particular order.
    pub fn container_ids(&self) -> Vec<String> {
        self.read().histories.keys().cloned().collect()
    }
}
