// Shared test helpers

#![allow(dead_code)]

use chrono::DateTime;
use dockmon::models::*;

/// Snapshot read at `secs` seconds after the epoch.
#[allow(clippy::too_many_arguments)]
pub fn snapshot(
    id: &str,
    secs: i64,
    total: u64,
    system: u64,
    cpus: u32,
    usage: u64,
    limit: u64,
    rx: u64,
    tx: u64,
) -> RawSnapshot {
    RawSnapshot {
        container_id: id.to_string(),
        read_timestamp: DateTime::from_timestamp(secs, 0).expect("valid timestamp"),
        cpu: CpuCounters {
            total_usage_ticks: total,
            system_usage_ticks: system,
            online_cpu_count: cpus,
        },
        memory: MemoryGauge {
            usage_bytes: usage,
            limit_bytes: limit,
        },
        network: NetworkCounters {
            rx_bytes: rx,
            tx_bytes: tx,
        },
    }
}

/// Snapshot with only the timestamp set; counters are zero.
pub fn at(id: &str, secs: i64) -> RawSnapshot {
    snapshot(id, secs, 0, 0, 1, 0, 0, 0, 0)
}

pub fn summaries(ids: &[&str]) -> Vec<ContainerSummary> {
    ids.iter().map(|id| ContainerSummary::from(*id)).collect()
}
