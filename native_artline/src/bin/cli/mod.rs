mod args;

pub use args::{Cli, Commands};

use std::io::IsTerminal;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use artline_shared::{ClientMsg, ServerMsg};
use native_artline::pretty;

/// Connect, send one command, then stream server messages. `stream` keeps the
/// connection open until the match ends; otherwise the first reply ends the
/// session (used for ping).
pub async fn run(url_str: &str, msg: ClientMsg, json: bool, stream: bool) -> Result<()> {
    let url = Url::parse(url_str).with_context(|| format!("invalid websocket url '{url_str}'"))?;
    let (ws, _) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .with_context(|| format!("connecting to {url}"))?;
    let (mut write, mut read) = ws.split();

    let txt = serde_json::to_string(&msg)?;
    write.send(Message::Text(txt)).await?;

    let color = std::io::stdout().is_terminal();
    while let Some(frame) = read.next().await {
        let frame = frame.context("websocket stream error")?;
        let Message::Text(txt) = frame else { continue };
        let Ok(sm) = serde_json::from_str::<ServerMsg>(&txt) else {
            continue;
        };
        if json {
            println!("{txt}");
        } else {
            println!("{}", pretty::format_server_msg(&sm, color));
        }
        match sm {
            ServerMsg::MatchEnded { .. } | ServerMsg::RoomError { .. } => break,
            _ if !stream => break,
            _ => {}
        }
    }
    Ok(())
}
