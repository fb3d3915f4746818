// Raw per-container stats reading as delivered by the runtime

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative CPU counters. Both usage fields only grow, but may stall between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuCounters {
    pub total_usage_ticks: u64,
    pub system_usage_ticks: u64,
    pub online_cpu_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryGauge {
    pub usage_bytes: u64,
    pub limit_bytes: u64,
}

/// Cumulative byte counters summed over every interface of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// One timestamped stats reading for one container. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    pub container_id: String,
    /// Source-side read time; also the deduplication key.
    pub read_timestamp: DateTime<Utc>,
    pub cpu: CpuCounters,
    pub memory: MemoryGauge,
    pub network: NetworkCounters,
}
