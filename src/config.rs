use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "dockmon.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    #[serde(default = "default_socket")]
    pub socket: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            socket: default_socket(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_socket() -> String {
    "unix:///var/run/docker.sock".into()
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Render tick period.
    #[serde(default = "default_render_interval_ms")]
    pub render_interval_ms: u64,
    /// How often the container list is refreshed and reconciled.
    #[serde(default = "default_list_refresh_interval_ms")]
    pub list_refresh_interval_ms: u64,
    /// How often to log app stats (tracked containers, active streams) at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            render_interval_ms: default_render_interval_ms(),
            list_refresh_interval_ms: default_list_refresh_interval_ms(),
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

fn default_render_interval_ms() -> u64 {
    500
}

fn default_list_refresh_interval_ms() -> u64 {
    1000
}

fn default_stats_log_interval_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log file; the terminal belongs to the UI.
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Default filter when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

fn default_log_file() -> String {
    "dockmon.log".into()
}

fn default_log_filter() -> String {
    "info".into()
}

impl AppConfig {
    /// Loads `explicit` if given, else `CONFIG_FILE`, else `dockmon.toml`. Only the
    /// implicit default file may be missing, in which case every default applies.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let named = explicit
            .map(|p| p.to_string_lossy().into_owned())
            .or_else(|| std::env::var("CONFIG_FILE").ok());
        let path = named.clone().unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
        let s = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if named.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(anyhow::anyhow!("config {}: {}", path, e)),
        };
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the docker socket (command-line override) and re-validates.
    pub fn with_socket(mut self, socket: Option<String>) -> anyhow::Result<Self> {
        if let Some(socket) = socket {
            self.docker.socket = socket;
            self.validate()?;
        }
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.docker.socket.is_empty(),
            "docker.socket must be non-empty"
        );
        crate::docker_repo::socket_path(&self.docker.socket)
            .map_err(|e| anyhow::anyhow!("docker.socket: {}", e))?;
        anyhow::ensure!(
            self.docker.timeout_secs > 0,
            "docker.timeout_secs must be > 0, got {}",
            self.docker.timeout_secs
        );
        anyhow::ensure!(
            self.monitoring.render_interval_ms > 0,
            "monitoring.render_interval_ms must be > 0, got {}",
            self.monitoring.render_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.list_refresh_interval_ms > 0,
            "monitoring.list_refresh_interval_ms must be > 0, got {}",
            self.monitoring.list_refresh_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            !self.logging.file.is_empty(),
            "logging.file must be non-empty"
        );
        Ok(())
    }
}
