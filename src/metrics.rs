// Derived metrics over raw snapshots. Pure functions; inputs are never mutated.

use crate::models::{DerivedView, NetworkDirection, RawSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MetricError {
    /// Memory limit reported as 0: no limit configured for the container.
    #[error("division by zero: no memory limit configured")]
    DivisionByZero,
}

/// CPU usage of `cur` relative to `prev`, truncated to a whole percent.
///
/// Returns 0 unless both the container and the system counters advanced, so a
/// stalled or reset counter reads as idle instead of negative or infinite.
pub fn cpu_percent(prev: &RawSnapshot, cur: &RawSnapshot) -> u64 {
    let (prev_total, cur_total) = (prev.cpu.total_usage_ticks, cur.cpu.total_usage_ticks);
    let (prev_sys, cur_sys) = (prev.cpu.system_usage_ticks, cur.cpu.system_usage_ticks);
    if cur_total <= prev_total || cur_sys <= prev_sys {
        return 0;
    }
    let cpu_delta = (cur_total - prev_total) as f64;
    let sys_delta = (cur_sys - prev_sys) as f64;
    let percent = (cpu_delta / sys_delta) * f64::from(cur.cpu.online_cpu_count) * 100.0;
    percent as u64
}

/// `usage * 100 / limit` with integer truncation.
pub fn memory_percent(latest: &RawSnapshot) -> Result<u64, MetricError> {
    let limit = latest.memory.limit_bytes;
    if limit == 0 {
        return Err(MetricError::DivisionByZero);
    }
    let percent = u128::from(latest.memory.usage_bytes) * 100 / u128::from(limit);
    Ok(u64::try_from(percent).unwrap_or(u64::MAX))
}

/// Signed byte delta between two cumulative counters. Negative after a counter reset.
pub fn network_delta(prev: &RawSnapshot, cur: &RawSnapshot, direction: NetworkDirection) -> i64 {
    let (prev, cur) = match direction {
        NetworkDirection::Rx => (prev.network.rx_bytes, cur.network.rx_bytes),
        NetworkDirection::Tx => (prev.network.tx_bytes, cur.network.tx_bytes),
    };
    cur.wrapping_sub(prev) as i64
}

/// One CPU percent per adjacent pair, oldest first. Fewer than two snapshots yield an empty series.
pub fn cpu_percent_series(history: &[RawSnapshot]) -> Vec<u64> {
    history
        .windows(2)
        .map(|pair| cpu_percent(&pair[0], &pair[1]))
        .collect()
}

pub fn network_series(history: &[RawSnapshot], direction: NetworkDirection) -> Vec<i64> {
    history
        .windows(2)
        .map(|pair| network_delta(&pair[0], &pair[1], direction))
        .collect()
}

/// Builds every derived metric for one container from a read view of its history.
pub fn derive_view(history: &[RawSnapshot]) -> DerivedView {
    let latest = history.last();
    DerivedView {
        cpu_percent_series: cpu_percent_series(history),
        memory_percent: latest.map(memory_percent),
        memory_usage_bytes: latest.map(|s| s.memory.usage_bytes),
        network_rx_series: network_series(history, NetworkDirection::Rx),
        network_tx_series: network_series(history, NetworkDirection::Tx),
        samples: history.len(),
    }
}
