//! Typed command dispatch for connections.
//!
//! Every client event lands here as a [`ClientMsg`] variant and is applied
//! under the owning room's lock. Errors are converted to `RoomError` messages
//! at this boundary: they never cross room boundaries and never take the
//! process down. Catalog failures during match initialization are the one
//! case reported to every participant, since they tear the room down.

use std::collections::HashSet;

use artline_shared::{CardId, ClientMsg, PlayerId, RoomCode, RoomPhase, ServerMsg};

use crate::game::{self, GameError};
use crate::server::rooms::{parse_code, PlayerSender};
use crate::server::AppState;

/// One live connection: its identity plus its outbound channel.
pub struct Conn {
    pub id: PlayerId,
    pub tx: PlayerSender,
}

impl Conn {
    pub fn send(&self, msg: ServerMsg) {
        let _ = self.tx.send(msg);
    }
}

pub async fn handle_client_msg(state: &AppState, conn: &Conn, msg: ClientMsg) {
    tracing::debug!(player = %conn.id, received = ?msg);
    let result = match msg {
        ClientMsg::CreateRoom { name } => handle_create(state, conn, name).await,
        ClientMsg::JoinRoom { code, name } => handle_join(state, conn, code, name).await,
        ClientMsg::SubmitMove { card_id, position } => {
            handle_move(state, conn, card_id, position).await
        }
        ClientMsg::Forfeit => handle_forfeit(state, conn).await,
        ClientMsg::Ping => {
            conn.send(ServerMsg::Pong);
            Ok(())
        }
    };
    if let Err(e) = result {
        tracing::debug!(player = %conn.id, kind = ?e.kind(), error = %e, "client command rejected");
        conn.send(ServerMsg::RoomError {
            message: e.to_string(),
        });
    }
}

fn valid_name(name: &str) -> Result<String, GameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::EmptyName);
    }
    Ok(trimmed.to_string())
}

async fn handle_create(state: &AppState, conn: &Conn, name: String) -> Result<(), GameError> {
    let name = valid_name(&name)?;
    if state.rooms.is_member(conn.id).await {
        return Err(GameError::AlreadyInRoom);
    }
    let code = state
        .rooms
        .create_room(conn.id, name.clone(), conn.tx.clone())
        .await;
    tracing::info!(room = %code, player = %conn.id, name = %name, "room created");
    conn.send(ServerMsg::RoomCreated { code, name });
    Ok(())
}

async fn handle_join(
    state: &AppState,
    conn: &Conn,
    code_input: String,
    name: String,
) -> Result<(), GameError> {
    let name = valid_name(&name)?;
    if state.rooms.is_member(conn.id).await {
        return Err(GameError::AlreadyInRoom);
    }
    let code = parse_code(&code_input)?;
    let entry = state
        .rooms
        .find(&code)
        .await
        .ok_or_else(|| GameError::RoomNotFound(code.to_string()))?;

    let mut inner = entry.inner.lock().await;
    inner.game.add_player(conn.id, name.clone())?;
    inner.senders.insert(conn.id, conn.tx.clone());
    state.rooms.bind(conn.id, code.clone()).await;
    conn.send(ServerMsg::RoomJoined {
        code: code.clone(),
        name,
    });
    tracing::info!(room = %code, player = %conn.id, "second player joined, starting match");

    // Match initialization. The room lock is held across the catalog call, so
    // anything racing against a half-initialized room queues behind it.
    let wanted = state.config.read().await.cards_per_match;
    let init = match state.provider.fetch_random_cards(wanted).await {
        Ok(pool) => game::initialize(&mut inner.game, pool),
        Err(e) => Err(GameError::Provider(e.to_string())),
    };

    match init {
        Ok(()) => {
            inner.send_all(ServerMsg::MatchStarted {
                message: "The match has begun!".into(),
            });
            inner.broadcast_views();
            Ok(())
        }
        Err(e) => {
            // Initialization failures hit everyone in the room, and the room
            // must never survive half-initialized.
            tracing::warn!(room = %code, error = %e, "match initialization failed, tearing room down");
            inner.send_all(ServerMsg::RoomError {
                message: e.to_string(),
            });
            drop(inner);
            state.rooms.remove_room(&code).await;
            Ok(())
        }
    }
}

async fn handle_move(
    state: &AppState,
    conn: &Conn,
    card_id: CardId,
    position: usize,
) -> Result<(), GameError> {
    let (code, entry) = state
        .rooms
        .lookup(conn.id)
        .await
        .ok_or(GameError::NotInRoom)?;
    let mut inner = entry.inner.lock().await;
    let outcome = inner.game.apply_move(conn.id, card_id, position)?;

    inner.send_to(
        conn.id,
        ServerMsg::MoveResult {
            correct: outcome.correct,
            message: outcome.message.clone(),
            card_id: outcome.card_id,
        },
    );
    inner.broadcast_views();

    if outcome.game_over {
        let winner_name = inner
            .game
            .player(conn.id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        inner.send_all(ServerMsg::MatchEnded {
            winner_name,
            winner_id: conn.id,
            by_forfeit: false,
            by_abandonment: false,
        });
        drop(inner);
        state.rooms.remove_room(&code).await;
    } else if !outcome.correct && inner.game.draw_pile_len() == 0 {
        // The mover needed a draw the pile could not supply (or drained it).
        // Restock one replacement card in the background; if none turns up,
        // later misplays simply go without a draw.
        let exclude: HashSet<CardId> = inner.game.card_ids_in_play().into_iter().collect();
        drop(inner);
        spawn_restock(state.clone(), code, exclude);
    }
    Ok(())
}

async fn handle_forfeit(state: &AppState, conn: &Conn) -> Result<(), GameError> {
    let (code, entry) = state
        .rooms
        .lookup(conn.id)
        .await
        .ok_or(GameError::NotInRoom)?;
    let mut inner = entry.inner.lock().await;
    let (winner_id, winner_name) = inner.game.forfeit(conn.id)?;
    tracing::info!(room = %code, loser = %conn.id, winner = %winner_id, "player forfeited");

    inner.send_all(ServerMsg::MatchEnded {
        winner_name,
        winner_id,
        by_forfeit: true,
        by_abandonment: false,
    });
    inner.broadcast_views();
    drop(inner);
    state.rooms.remove_room(&code).await;
    Ok(())
}

/// Connection closed. Mid-match this is terminal for the room: the survivor
/// wins by abandonment. A waiting room is simply destroyed.
pub async fn handle_disconnect(state: &AppState, player: PlayerId) {
    let Some((code, entry)) = state.rooms.lookup(player).await else {
        return;
    };
    let mut inner = entry.inner.lock().await;
    inner.senders.remove(&player);
    match inner.game.handle_disconnect(player) {
        Some((winner_id, winner_name)) => {
            tracing::info!(room = %code, gone = %player, winner = %winner_id, "player disconnected mid-match");
            inner.send_all(ServerMsg::OpponentDisconnected {
                message: "Your opponent has disconnected. You win by abandonment.".into(),
            });
            inner.send_all(ServerMsg::MatchEnded {
                winner_name,
                winner_id,
                by_forfeit: false,
                by_abandonment: true,
            });
            inner.broadcast_views();
        }
        None => {
            tracing::info!(room = %code, gone = %player, "player left while waiting, removing room");
        }
    }
    drop(inner);
    state.rooms.remove_room(&code).await;
}

fn spawn_restock(state: AppState, code: RoomCode, exclude: HashSet<CardId>) {
    tokio::spawn(async move {
        let Some(card) = state.provider.fetch_replacement(&exclude).await else {
            tracing::debug!(room = %code, "no replacement card available");
            return;
        };
        if let Some(entry) = state.rooms.find(&code).await {
            let mut inner = entry.inner.lock().await;
            if inner.game.phase == RoomPhase::Playing {
                tracing::debug!(room = %code, card = %card.id, "draw pile restocked");
                inner.game.restock(card);
            }
        }
    });
}
