// CLI module for stability-relay

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// stability-relay - Multipart relay from browser forms to the Stability AI image API
#[derive(Parser, Debug, Default)]
#[command(name = "stability-relay", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.stability-relay/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides server.host
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
