// Convert a raw Docker stats response into a RawSnapshot.

use bollard::models::ContainerStatsResponse;
use chrono::{DateTime, Utc};

use crate::models::{CpuCounters, MemoryGauge, NetworkCounters, RawSnapshot};

/// Returns `None` when the response lacks a parseable read time or the CPU block.
/// Counters keep their cumulative form; deltas are derived later from adjacent snapshots.
pub(crate) fn to_raw_snapshot(s: &ContainerStatsResponse, id: &str) -> Option<RawSnapshot> {
    let read_timestamp = s.read.as_ref().and_then(|r| parse_read_time(&r.to_string()))?;

    let cpu_stats = s.cpu_stats.as_ref()?;
    let cpu_usage = cpu_stats.cpu_usage.as_ref()?;
    let online_cpu_count = cpu_stats
        .online_cpus
        .filter(|n| *n > 0)
        .or_else(|| {
            cpu_usage
                .percpu_usage
                .as_ref()
                .map(|p| p.len() as u32)
                .filter(|n| *n > 0)
        })
        .unwrap_or(1);

    let memory = MemoryGauge {
        usage_bytes: s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0),
        limit_bytes: s.memory_stats.as_ref().and_then(|m| m.limit).unwrap_or(0),
    };

    let network = s
        .networks
        .as_ref()
        .map_or(NetworkCounters::default(), |n| {
            let mut counters = NetworkCounters::default();
            for v in n.values() {
                counters.rx_bytes += v.rx_bytes.unwrap_or(0);
                counters.tx_bytes += v.tx_bytes.unwrap_or(0);
            }
            counters
        });

    Some(RawSnapshot {
        container_id: id.to_string(),
        read_timestamp,
        cpu: CpuCounters {
            total_usage_ticks: cpu_usage.total_usage.unwrap_or(0),
            system_usage_ticks: cpu_stats.system_cpu_usage.unwrap_or(0),
            online_cpu_count,
        },
        memory,
        network,
    })
}

/// The daemon reports RFC 3339 with nanoseconds; the zero time means "not read yet".
fn parse_read_time(raw: &str) -> Option<DateTime<Utc>> {
    let ts = raw.trim().parse::<DateTime<Utc>>().ok()?;
    (ts.timestamp() > 0).then_some(ts)
}
