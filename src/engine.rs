// Aggregation engine: the single authority the render side talks to.
//
// Lock order is always `tracked` then the history store, so a reconcile can never
// interleave with an ingest for the same container.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::history_store::{AppendOutcome, HistoryStore};
use crate::metrics;
use crate::models::{ContainerSummary, ContainerView, DashboardSnapshot, DerivedView, RawSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no tracked container at index {index}")]
    NotFound { index: usize },
    #[error("engine closed; snapshot discarded")]
    Closed,
}

/// What a [`AggregationEngine::reconcile`] call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Default)]
struct TrackedSet {
    /// Last reconciled order, with late-created ids appended.
    order: Vec<String>,
    labels: HashMap<String, ContainerSummary>,
}

impl TrackedSet {
    fn contains(&self, id: &str) -> bool {
        self.labels.contains_key(id)
    }

    fn insert(&mut self, summary: ContainerSummary) {
        self.order.push(summary.id.clone());
        self.labels.insert(summary.id.clone(), summary);
    }
}

#[derive(Debug, Default)]
pub struct AggregationEngine {
    store: HistoryStore,
    tracked: RwLock<TrackedSet>,
    closed: AtomicBool,
}

impl AggregationEngine {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: HistoryStore::new(capacity),
            tracked: RwLock::new(TrackedSet::default()),
            closed: AtomicBool::new(false),
        }
    }

    fn tracked(&self) -> RwLockReadGuard<'_, TrackedSet> {
        self.tracked.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn tracked_mut(&self) -> RwLockWriteGuard<'_, TrackedSet> {
        self.tracked.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Syncs the tracked set with the live container list: unseen ids get an empty
    /// history, ids missing from `live` lose theirs. The list order becomes the
    /// details index order. Repeating a call with the same list changes nothing.
    pub fn reconcile(&self, live: impl IntoIterator<Item = ContainerSummary>) -> ReconcileReport {
        let mut seen = HashSet::new();
        let live: Vec<ContainerSummary> = live
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect();

        let mut tracked = self.tracked_mut();
        let mut report = ReconcileReport::default();

        for id in &tracked.order {
            if !seen.contains(id) {
                self.store.evict(id);
                report.removed.push(id.clone());
            }
        }
        for c in &live {
            if !tracked.contains(&c.id) {
                self.store.track(&c.id);
                report.added.push(c.id.clone());
            }
        }

        tracked.order = live.iter().map(|c| c.id.clone()).collect();
        tracked.labels = live.into_iter().map(|c| (c.id.clone(), c)).collect();

        if !report.is_noop() {
            debug!(
                added = report.added.len(),
                removed = report.removed.len(),
                tracked = tracked.order.len(),
                "reconciled container set"
            );
        }
        report
    }

    /// Stores one raw snapshot. An id unknown to the last reconcile is tracked on the
    /// spot (late creation); the next reconcile evicts it again if it is gone.
    pub fn ingest(
        &self,
        container_id: &str,
        snapshot: RawSnapshot,
    ) -> Result<AppendOutcome, EngineError> {
        if self.is_closed() {
            return Err(EngineError::Closed);
        }
        {
            let tracked = self.tracked();
            if tracked.contains(container_id) {
                return Ok(self.store.append(container_id, snapshot));
            }
        }
        let mut tracked = self.tracked_mut();
        if !tracked.contains(container_id) {
            debug!(container_id, "late-creating history for untracked container");
            self.store.evict(container_id);
            tracked.insert(ContainerSummary::from(container_id));
        }
        Ok(self.store.append(container_id, snapshot))
    }

    /// Fresh metrics from the current history; empty for unknown containers.
    pub fn derived_view(&self, container_id: &str) -> DerivedView {
        metrics::derive_view(&self.store.snapshots_for(container_id))
    }

    /// Maps an operator-typed index to a tracked container. Indices follow the last
    /// reconciled list and are reassigned on every reconcile.
    pub fn selected_for_details(&self, index: usize) -> Result<String, EngineError> {
        self.tracked()
            .order
            .get(index)
            .cloned()
            .ok_or(EngineError::NotFound { index })
    }

    pub fn tracked_ids(&self) -> Vec<String> {
        self.tracked().order.clone()
    }

    pub fn label(&self, container_id: &str) -> Option<ContainerSummary> {
        self.tracked().labels.get(container_id).cloned()
    }

    pub fn history(&self, container_id: &str) -> Vec<RawSnapshot> {
        self.store.snapshots_for(container_id)
    }

    pub fn set_capacity(&self, capacity: usize) {
        self.store.set_capacity(capacity);
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Every tracked container with its derived metrics, built under one read of the
    /// tracked set so all panels drawn from it agree with each other.
    pub fn dashboard(&self) -> DashboardSnapshot {
        let tracked = self.tracked();
        let containers = tracked
            .order
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let label = tracked.labels.get(id);
                ContainerView {
                    index,
                    id: id.clone(),
                    name: label.map_or_else(|| id.clone(), |l| l.name.clone()),
                    image: label.map(|l| l.image.clone()).unwrap_or_default(),
                    view: metrics::derive_view(&self.store.snapshots_for(id)),
                }
            })
            .collect();
        DashboardSnapshot { containers }
    }

    /// Stops accepting snapshots; later ingests fail with [`EngineError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
