//! Wire-protocol types shared by the ArtLine server, the CLI client and tests.

pub mod cards;
pub mod messages;
pub mod player;
pub mod room;

pub use cards::{Card, CardId, WorkKind};
pub use messages::{ClientMsg, ServerMsg};
pub use player::{PlayerId, PlayerPublic};
pub use room::{RoomCode, RoomPhase, RoomView, CODE_ALPHABET, CODE_LEN};
