//! Authoritative state machine for ArtLine matches. Implementation split
//! across multiple files for clarity.

mod dealing;
mod engine;
mod error;
mod moves;

pub use dealing::{initialize, INITIAL_HAND_SIZE};
pub use engine::{Player, Room};
pub use error::{ErrorKind, GameError};
pub use moves::MoveOutcome;
