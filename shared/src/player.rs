//! Player identity and the per-viewer public projection of a player.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Unique identifier for a connected player. Allocated per connection by the
/// server; the connection is the identity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

impl From<u64> for PlayerId {
    fn from(v: u64) -> Self {
        PlayerId(v)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a given viewer is allowed to see of a player. `hand` is only set for
/// the viewer themselves; opponents get the count alone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub hand_count: usize,
    pub hand: Option<Vec<Card>>, // only set for the viewer
}
