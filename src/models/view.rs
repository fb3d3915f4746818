// Derived metrics handed to the render side

use serde::Serialize;

use crate::metrics::MetricError;

/// Direction selector for network deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkDirection {
    Rx,
    Tx,
}

/// Metrics for one container, computed fresh from its history on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    /// One value per adjacent snapshot pair, oldest first.
    pub cpu_percent_series: Vec<u64>,
    /// `None` while no snapshot has been stored.
    #[serde(skip)]
    pub memory_percent: Option<Result<u64, MetricError>>,
    pub memory_usage_bytes: Option<u64>,
    pub network_rx_series: Vec<i64>,
    pub network_tx_series: Vec<i64>,
    /// Number of snapshots the view was derived from.
    pub samples: usize,
}

impl DerivedView {
    /// Most recent CPU percent, 0 until two snapshots exist.
    pub fn last_cpu_percent(&self) -> u64 {
        self.cpu_percent_series.last().copied().unwrap_or(0)
    }

    pub fn last_network_delta(&self, direction: NetworkDirection) -> i64 {
        let series = match direction {
            NetworkDirection::Rx => &self.network_rx_series,
            NetworkDirection::Tx => &self.network_tx_series,
        };
        series.last().copied().unwrap_or(0)
    }

    pub fn network_series(&self, direction: NetworkDirection) -> &[i64] {
        match direction {
            NetworkDirection::Rx => &self.network_rx_series,
            NetworkDirection::Tx => &self.network_tx_series,
        }
    }
}

/// One tracked container as seen by a single render tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerView {
    /// Position in the last reconciled list; the quick-select key for details.
    pub index: usize,
    pub id: String,
    pub name: String,
    pub image: String,
    pub view: DerivedView,
}

/// Immutable view of every tracked container, shared by all renderers of one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub containers: Vec<ContainerView>,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ContainerView> {
        self.containers.iter().find(|c| c.id == id)
    }
}
