//! Main entry point for the ArtLine game server.

use native_artline::{catalog, cli, config, server};

use anyhow::Context;
use catalog::MetCatalog;
use clap::Parser;
use config::Config;
use server::AppState;
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;

/// Minimal server entrypoint: parse CLI args and run the server.
///
/// Usage:
///   artline-server [--config PATH] [--port PORT]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::ServerCli::parse();

    // Initialize tracing subscriber for logging
    // If debug is on: show everything at DEBUG level
    // If debug is off: show native_artline at INFO, everything else at WARN/ERROR
    let log_filter = if cli.debug {
        "debug".to_string()
    } else {
        "native_artline=info,artline_shared=info,warn".to_string()
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .with_thread_ids(cli.debug)
        .with_file(cli.debug)
        .with_line_number(cli.debug)
        .init();

    let config_path: PathBuf = cli.config.clone();

    // Load or create config file (creates file if missing).
    let mut cfg = Config::load_or_create(&config_path)
        .with_context(|| format!("loading or creating config '{}'", config_path.display()))?;

    // Apply CLI overrides in-memory (non-persistent by default)
    if let Some(cards) = cli.cards {
        cfg.cards_per_match = cards;
    }

    // Persist overrides only if requested
    if cli.persist {
        cfg.save(&config_path)
            .with_context(|| format!("saving updated config '{}'", config_path.display()))?;
    }

    tracing::info!(config = %config_path.display(), cards_per_match = cfg.cards_per_match);

    let provider = Arc::new(MetCatalog::new(cfg.met_base_url.clone()));
    let state = AppState::new(cfg, provider);

    // Find first available port starting from the requested one
    let port = find_available_port(cli.port)
        .map_err(|e| anyhow::anyhow!("Could not find an available port: {}", e))?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!(port, "starting server");
    if port != cli.port {
        tracing::warn!(port, requested = cli.port, "requested port was not available, using alternative port");
    }

    server::run_server(addr, state).await?;
    Ok(())
}

/// Find the first available port starting from the given port number
fn find_available_port(start_port: u16) -> anyhow::Result<u16> {
    for port in start_port..start_port + 100 {
        match TcpListener::bind(("127.0.0.1", port)) {
            Ok(_) => return Ok(port),
            Err(_) => continue,
        }
    }
    Err(anyhow::anyhow!(
        "No available ports found in range {}..{}",
        start_port,
        start_port + 100
    ))
}
