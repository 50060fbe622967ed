use clap::Parser;
use std::path::PathBuf;

/// Server CLI for artline-server
#[derive(Parser, Debug, Clone)]
#[command(name = "artline-server", version, about = "ArtLine timeline game server")]
pub struct ServerCli {
    /// Path to config file
    #[arg(long, default_value = "artline-server.toml")]
    pub config: PathBuf,

    /// Port to listen on; falls back to the next free port when taken
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Cards to request per match (overrides config)
    #[arg(long)]
    pub cards: Option<usize>,

    /// Persist CLI overrides back to the config file
    #[arg(long, default_value_t = false)]
    pub persist: bool,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
