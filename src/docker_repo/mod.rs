// Docker control-plane client via bollard: list, inspect, per-container stats streams.

mod inspect;
mod stats;
mod warn_limit;

use crate::engine::{AggregationEngine, EngineError};
use crate::models::{ContainerDetails, ContainerSummary};
use bollard::Docker;
use bollard::query_parameters::{InspectContainerOptions, ListContainersOptions, StatsOptions};
use futures_util::StreamExt;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use warn_limit::WarnLimiter;

/// Repeated failures (daemon down, a stream that keeps erroring) warn at most this often.
pub const FAILURE_WARN_INTERVAL: Duration = Duration::from_secs(30);

/// Strips the `unix://` scheme. Only local unix sockets are supported.
pub fn socket_path(socket: &str) -> anyhow::Result<&str> {
    let path = socket.strip_prefix("unix://").unwrap_or(socket);
    anyhow::ensure!(
        path.starts_with('/'),
        "docker socket must be unix:///path or an absolute path, got {:?}",
        socket
    );
    Ok(path)
}

fn should_warn(limiter: &Mutex<WarnLimiter>, container_id: &str) -> bool {
    limiter
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .should_warn(container_id, Instant::now())
}

pub struct DockerRepo {
    docker: Docker,
    active_streams: Arc<RwLock<HashMap<String, tokio::task::JoinHandle<()>>>>,
    stream_warnings: Arc<Mutex<WarnLimiter>>,
}

impl DockerRepo {
    pub fn connect(socket: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let path = socket_path(socket)?;
        let docker = Docker::connect_with_unix(path, timeout_secs, bollard::API_DEFAULT_VERSION)?;
        Ok(Self {
            docker,
            active_streams: Arc::new(RwLock::new(HashMap::new())),
            stream_warnings: Arc::new(Mutex::new(WarnLimiter::new(FAILURE_WARN_INTERVAL))),
        })
    }

    /// Running containers in daemon list order.
    #[instrument(skip(self), fields(repo = "docker", operation = "list_running"))]
    pub async fn list_running(&self) -> anyhow::Result<Vec<ContainerSummary>> {
        let mut filters = HashMap::new();
        filters.insert("status".to_string(), vec!["running".to_string()]);

        let filter = ListContainersOptions {
            all: false,
            filters: Some(filters),
            ..Default::default()
        };

        let containers = self.docker.list_containers(Some(filter)).await?;
        Ok(containers
            .iter()
            .filter_map(|c| {
                let id = c.id.clone()?;
                let name = c
                    .names
                    .as_ref()
                    .and_then(|n| n.first())
                    .cloned()
                    .unwrap_or_else(|| id.clone());
                Some(ContainerSummary {
                    name: name.trim_start_matches('/').to_string(),
                    image: c.image.clone().unwrap_or_default(),
                    id,
                })
            })
            .collect())
    }

    /// Lists running containers, reconciles `engine` against them and keeps exactly one
    /// stats stream per live container. A failed list stops every stream.
    pub async fn refresh(
        &self,
        engine: &Arc<AggregationEngine>,
    ) -> anyhow::Result<Vec<ContainerSummary>> {
        let containers = match self.list_running().await {
            Ok(c) => c,
            Err(e) => {
                self.stop_all().await;
                return Err(e);
            }
        };
        engine.reconcile(containers.iter().cloned());

        let running: HashSet<&str> = containers.iter().map(|c| c.id.as_str()).collect();
        self.stream_warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(&running);
        let current_keys: Vec<String> = {
            let r = self.active_streams.read().await;
            r.keys().cloned().collect()
        };

        let to_add: Vec<&ContainerSummary> = containers
            .iter()
            .filter(|c| !current_keys.contains(&c.id))
            .collect();
        let to_remove: Vec<String> = current_keys
            .into_iter()
            .filter(|id| !running.contains(id.as_str()))
            .collect();

        let mut streams = self.active_streams.write().await;
        for c in to_add {
            let handle = self.start_monitoring(c.id.clone(), c.name.clone(), engine.clone());
            streams.insert(c.id.clone(), handle);
        }
        for id in &to_remove {
            if let Some(handle) = streams.remove(id) {
                handle.abort();
            }
        }
        drop(streams);

        Ok(containers)
    }

    fn start_monitoring(
        &self,
        id: String,
        name: String,
        engine: Arc<AggregationEngine>,
    ) -> tokio::task::JoinHandle<()> {
        let docker = self.docker.clone();
        let active_streams = self.active_streams.clone();
        let stream_warnings = self.stream_warnings.clone();

        tokio::spawn(async move {
            let options = StatsOptions {
                stream: true,
                ..Default::default()
            };
            let mut stream = docker.stats(&id, Some(options));

            while let Some(result) = stream.next().await {
                match result {
                    Ok(s) => {
                        let Some(snapshot) = stats::to_raw_snapshot(&s, &id) else {
                            debug!(container = %name, "skipping incomplete stats event");
                            continue;
                        };
                        if let Err(EngineError::Closed) = engine.ingest(&id, snapshot) {
                            break;
                        }
                    }
                    Err(e) => {
                        // The next refresh restarts the stream; a persistent failure warns once per interval.
                        if should_warn(&stream_warnings, &id) {
                            warn!(container = %name, error = %e, "stats stream error");
                        } else {
                            debug!(container = %name, error = %e, "stats stream error");
                        }
                        break;
                    }
                }
            }
            debug!(container = %name, "stats stream ended");
            active_streams.write().await.remove(&id);
        })
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "inspect"))]
    pub async fn inspect(&self, id: &str) -> anyhow::Result<ContainerDetails> {
        let ci = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;
        Ok(inspect::to_details(&ci))
    }

    /// Aborts every stats stream.
    pub async fn stop_all(&self) {
        let mut streams = self.active_streams.write().await;
        if !streams.is_empty() {
            warn!(streams = streams.len(), "stopping all stats streams");
        }
        for (_, handle) in streams.drain() {
            handle.abort();
        }
    }

    pub async fn active_stream_count(&self) -> usize {
        self.active_streams.read().await.len()
    }
}
