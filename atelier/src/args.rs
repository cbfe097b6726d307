use std::path::PathBuf;

use clap::Parser;

/// Atelier image generation demo gateway
#[derive(Debug, Parser)]
#[command(name = "atelier", about = "Prompt-to-image demo server with backend fallback")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "atelier.toml", env = "ATELIER_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ATELIER_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
