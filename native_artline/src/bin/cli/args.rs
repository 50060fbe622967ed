use clap::{Parser, Subcommand};

/// Command-line websocket client for an ArtLine server.
#[derive(Parser, Debug)]
#[command(name = "artline-cli", version, about = "ArtLine websocket client")]
pub struct Cli {
    /// WebSocket URL of the server
    #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
    pub url: String,

    /// Print raw JSON messages instead of formatted output
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a room and stream events while waiting for an opponent
    Create {
        #[arg(long)]
        name: String,
    },
    /// Join a room by code and stream events
    Join {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
    /// Check that the server answers
    Ping,
}
