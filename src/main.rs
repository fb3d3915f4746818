use anyhow::Result;
use clap::Parser;
use dockmon::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Logs go to a file: stdout belongs to the terminal UI.
fn init_logging(config: &config::LoggingConfig) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| anyhow::anyhow!("log file {}: {}", config.file, e))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let app_config = config::AppConfig::load(cli.config.as_deref())?.with_socket(cli.docker)?;
    init_logging(&app_config.logging)?;
    tracing::info!(
        version = version::VERSION,
        socket = %app_config.docker.socket,
        "starting"
    );

    let docker_repo = Arc::new(docker_repo::DockerRepo::connect(
        &app_config.docker.socket,
        app_config.docker.timeout_secs,
    )?);
    let engine = Arc::new(engine::AggregationEngine::new(
        history_store::DEFAULT_CAPACITY,
    ));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            docker_repo: docker_repo.clone(),
            engine: engine.clone(),
            shutdown_rx,
        },
        worker::WorkerConfig {
            list_refresh_interval_ms: app_config.monitoring.list_refresh_interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let mut app = tui::App::new(
        engine,
        docker_repo,
        Duration::from_millis(app_config.monitoring.render_interval_ms),
    );
    let result = app.run().await;

    tracing::info!("Received quit; shutting down");
    let _ = shutdown_tx.send(());
    let _ = worker_handle.await;

    result
}
