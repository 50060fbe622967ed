//! Room codes, phases and the redacted per-viewer room view.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{PlayerId, PlayerPublic};

/// Alphabet for room codes. Visually ambiguous characters (0/O, 1/I) are
/// excluded so codes survive being read aloud or scribbled down.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Room codes are always exactly this long.
pub const CODE_LEN: usize = 6;

/// A shareable 6-character room code. Construction normalizes case, so two
/// codes compare equal regardless of how the user typed them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    /// Parse user input into a code: trims, uppercases, and checks that the
    /// result is exactly [`CODE_LEN`] characters from [`CODE_ALPHABET`].
    pub fn parse(input: &str) -> Option<RoomCode> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.len() != CODE_LEN {
            return None;
        }
        if !normalized.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return None;
        }
        Some(RoomCode(normalized))
    }

    /// Wrap a string that is already known to be a valid code (server-side
    /// generation). Not exposed for arbitrary client input.
    pub fn from_generated(code: String) -> RoomCode {
        debug_assert!(code.len() == CODE_LEN);
        RoomCode(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle phase of a room. `Terminated` is terminal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomPhase {
    Waiting,
    Playing,
    Terminated,
}

/// Per-viewer snapshot of a room. The draw pile is deliberately not part of
/// this type: no projection, for any recipient, ever carries it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomView {
    pub code: RoomCode,
    pub phase: RoomPhase,
    pub board: Vec<Card>,
    pub players: Vec<PlayerPublic>,
    pub turn: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub last_move: Option<String>,
}
