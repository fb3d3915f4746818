// Bounded, ordered snapshot buffer for one container

use std::collections::VecDeque;

use crate::models::RawSnapshot;

use super::AppendOutcome;

#[derive(Debug, Default)]
pub(crate) struct ContainerHistory {
    entries: VecDeque<RawSnapshot>,
}

impl ContainerHistory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends unless `snapshot` repeats the last stored read time, then trims the
    /// oldest entries down to `capacity`.
    pub(crate) fn push(&mut self, snapshot: RawSnapshot, capacity: usize) -> AppendOutcome {
        if self
            .entries
            .back()
            .is_some_and(|last| last.read_timestamp == snapshot.read_timestamp)
        {
            return AppendOutcome::DuplicateIgnored;
        }
        self.entries.push_back(snapshot);
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
        AppendOutcome::Stored
    }

    pub(crate) fn to_vec(&self) -> Vec<RawSnapshot> {
        self.entries.iter().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
