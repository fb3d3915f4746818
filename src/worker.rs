// Background container-list worker: periodic list -> reconcile -> stream start/stop.
// Snapshots themselves are pushed into the engine by the per-container stream tasks.

use crate::docker_repo::{DockerRepo, FAILURE_WARN_INTERVAL};
use crate::engine::AggregationEngine;
use std::sync::Arc;
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

/// Repos, engine, and shutdown for the worker.
pub struct WorkerDeps {
    pub docker_repo: Arc<DockerRepo>,
    pub engine: Arc<AggregationEngine>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub list_refresh_interval_ms: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Spawns the list-refresh loop. On shutdown the engine is closed and every stream aborted.
pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        list_refresh_interval_ms = config.list_refresh_interval_ms
    );
    tokio::spawn(run(deps, config).instrument(span))
}

async fn run(deps: WorkerDeps, config: WorkerConfig) {
    let WorkerDeps {
        docker_repo,
        engine,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        list_refresh_interval_ms,
        stats_log_interval_secs,
    } = config;

    let mut tick = interval(Duration::from_millis(list_refresh_interval_ms));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
    stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut refreshes_total: u64 = 0;
    let mut last_failure_warn: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                match docker_repo.refresh(&engine).await {
                    Ok(_) => {
                        refreshes_total += 1;
                        last_failure_warn = None;
                    }
                    Err(e) => {
                        let should_warn = last_failure_warn
                            .is_none_or(|t| t.elapsed() >= FAILURE_WARN_INTERVAL);
                        if should_warn {
                            tracing::warn!(
                                error = %e,
                                operation = "refresh",
                                "container list failed; stats streams stopped"
                            );
                            last_failure_warn = Some(Instant::now());
                        }
                    }
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!("Worker shutting down");
                break;
            }
            _ = stats_log_tick.tick() => {
                let active_streams = docker_repo.active_stream_count().await;
                tracing::info!(
                    tracked_containers = engine.tracked_ids().len(),
                    active_streams,
                    history_capacity = engine.capacity(),
                    refreshes_total,
                    "app stats"
                );
            }
        }
    }

    engine.close();
    docker_repo.stop_all().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn run_future_is_send() {
        // Type-checked only; tokio::spawn needs the whole loop to be Send.
        let _ = |deps: WorkerDeps, config: WorkerConfig| assert_send(&run(deps, config));
    }
}
