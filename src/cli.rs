// Command-line flags

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dockmon", version, about = "Live Docker container stats in the terminal")]
pub struct Cli {
    /// Docker daemon socket (overrides docker.socket), e.g. unix:///var/run/docker.sock
    #[arg(long)]
    pub docker: Option<String>,

    /// Config file (default: $CONFIG_FILE, then ./dockmon.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
