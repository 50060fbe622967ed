//! The closed error taxonomy for room and match operations.
//!
//! Every variant is a local, recoverable condition: it is reported to the
//! offending client (or, for resource failures, to the whole room) and never
//! tears down anything beyond the room it belongs to.

use thiserror::Error;

/// Coarse classification used by the session layer to decide who hears about
/// an error. `Resource` failures reach every participant of the affected room
/// and destroy it; everything else goes back to the caller alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    State,
    Resource,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the name cannot be empty")]
    EmptyName,
    #[error("malformed room code")]
    MalformedCode,
    #[error("room {0} does not exist")]
    RoomNotFound(String),
    #[error("the room is already full")]
    RoomFull,
    #[error("the match has already started")]
    AlreadyStarted,
    #[error("you are already in a room")]
    AlreadyInRoom,
    #[error("you are not in a room")]
    NotInRoom,
    #[error("the match is not in progress")]
    NotInProgress,
    #[error("not your turn")]
    NotYourTurn,
    #[error("that card is not in your hand")]
    CardNotInHand,
    #[error("position {position} is outside the board (max {max})")]
    BadPosition { position: usize, max: usize },
    #[error("need at least {needed} cards to start a match, the catalog returned {got}")]
    InsufficientCards { needed: usize, got: usize },
    #[error("could not load artworks from the catalog: {0}")]
    Provider(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::EmptyName | GameError::MalformedCode | GameError::BadPosition { .. } => {
                ErrorKind::Validation
            }
            GameError::RoomNotFound(_) | GameError::CardNotInHand => ErrorKind::NotFound,
            GameError::RoomFull
            | GameError::AlreadyStarted
            | GameError::AlreadyInRoom
            | GameError::NotInRoom
            | GameError::NotInProgress
            | GameError::NotYourTurn => ErrorKind::State,
            GameError::InsufficientCards { .. } | GameError::Provider(_) => ErrorKind::Resource,
        }
    }
}
