mod cli;

use clap::Parser;
use cli::{Cli, Commands};

use artline_shared::ClientMsg;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { name } => {
            cli::run(&cli.url, ClientMsg::CreateRoom { name }, cli.json, true).await?;
        }
        Commands::Join { code, name } => {
            cli::run(&cli.url, ClientMsg::JoinRoom { code, name }, cli.json, true).await?;
        }
        Commands::Ping => {
            cli::run(&cli.url, ClientMsg::Ping, cli.json, false).await?;
        }
    }

    Ok(())
}
