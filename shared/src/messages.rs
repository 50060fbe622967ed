//! Client-server messaging protocol for ArtLine.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::player::PlayerId;
use crate::room::{RoomCode, RoomView};

/// Messages that clients can send to the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMsg {
    /// Open a new room; the sender becomes its first player.
    CreateRoom { name: String },
    /// Join an existing room by code. Triggers match initialization once the
    /// room reaches two players.
    JoinRoom { code: String, name: String },
    /// Place a card from the sender's hand at a zero-based board position
    /// (0 = leftmost, board length = rightmost).
    SubmitMove { card_id: CardId, position: usize },
    /// Concede the current match.
    Forfeit,
    Ping,
}

/// Messages that the server can send to clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMsg {
    RoomCreated {
        code: RoomCode,
        name: String,
    },
    RoomJoined {
        code: RoomCode,
        name: String,
    },
    MatchStarted {
        message: String,
    },
    /// Per-recipient snapshot; each player receives their own redacted view.
    StateUpdated(RoomView),
    /// Sent only to the player who submitted the move.
    MoveResult {
        correct: bool,
        message: String,
        card_id: CardId,
    },
    MatchEnded {
        winner_name: String,
        winner_id: PlayerId,
        #[serde(default)]
        by_forfeit: bool,
        #[serde(default)]
        by_abandonment: bool,
    },
    RoomError {
        message: String,
    },
    OpponentDisconnected {
        message: String,
    },
    Pong,
}
