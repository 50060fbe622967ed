// WebSocket handler and websocket-specific helpers.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use artline_shared::{ClientMsg, ServerMsg};

use crate::server::session::{self, Conn};
use crate::server::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    // Each connection gets an identity and an outbound channel. Replies and
    // room broadcasts both flow through the channel, so the client observes
    // them in the order the room produced them.
    let player_id = state.rooms.alloc_player_id();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut outbound = UnboundedReceiverStream::new(rx);
    let conn = Conn { id: player_id, tx };
    tracing::info!(player = %player_id, "client connected");

    loop {
        tokio::select! {
            biased;

            out = outbound.next() => {
                match out {
                    Some(sm) => send_ws(&mut socket, &sm).await,
                    // All senders dropped; nothing further can arrive.
                    None => break,
                }
            }

            msg = socket.next() => {
                match msg {
                    Some(Ok(Message::Text(txt))) => {
                        if let Ok(cm) = serde_json::from_str::<ClientMsg>(&txt) {
                            session::handle_client_msg(&state, &conn, cm).await;
                        } else {
                            tracing::warn!(player = %player_id, raw_in = %txt, "failed to parse incoming ClientMsg JSON");
                            conn.send(ServerMsg::RoomError {
                                message: "Malformed ClientMsg JSON".into(),
                            });
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    session::handle_disconnect(&state, player_id).await;
    tracing::info!(player = %player_id, "client disconnected");
}

async fn send_ws(socket: &mut WebSocket, msg: &ServerMsg) {
    match serde_json::to_string(msg) {
        Ok(txt) => {
            let _ = socket.send(Message::Text(txt)).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize ServerMsg for websocket send");
        }
    }
}
