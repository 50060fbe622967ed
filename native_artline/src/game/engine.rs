//! Core Room and Player definitions + constructors and small helpers.

use std::collections::VecDeque;

use artline_shared::{Card, CardId, PlayerId, PlayerPublic, RoomCode, RoomPhase, RoomView};

use super::GameError;

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
}

/// The complete server-side state of one match. All mutation goes through the
/// methods in this module and its siblings; the only view that ever leaves the
/// server is the redacted [`RoomView`] produced by [`Room::view_for`].
#[derive(Clone, Debug)]
pub struct Room {
    pub code: RoomCode,
    pub phase: RoomPhase,
    pub players: Vec<Player>,
    /// Correctly placed cards, sorted non-decreasingly by year.
    pub board: Vec<Card>,
    /// Undealt cards. Server-private: never serialized into any view.
    pub(crate) draw_pile: VecDeque<Card>,
    pub turn: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub last_move: Option<String>,
    /// Cards accounted for across board, pile and hands. Fixed at match
    /// initialization; bumped only when a replacement card is restocked.
    pub(crate) total_cards: usize,
}

impl Room {
    /// A fresh room in the waiting phase, owned by its creator.
    pub fn new(code: RoomCode, creator: PlayerId, creator_name: String) -> Self {
        Self {
            code,
            phase: RoomPhase::Waiting,
            players: vec![Player {
                id: creator,
                name: creator_name,
                hand: Vec::new(),
            }],
            board: Vec::new(),
            draw_pile: VecDeque::new(),
            turn: None,
            winner: None,
            last_move: None,
            total_cards: 0,
        }
    }

    /// Add the second player. Rejected once the room is full or the match has
    /// left the waiting phase.
    pub fn add_player(&mut self, id: PlayerId, name: String) -> Result<(), GameError> {
        if self.players.len() >= 2 {
            return Err(GameError::RoomFull);
        }
        if self.phase != RoomPhase::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        self.players.push(Player {
            id,
            name,
            hand: Vec::new(),
        });
        Ok(())
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn opponent_of(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id != id)
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards currently accounted for across board, pile and every hand.
    pub fn card_count(&self) -> usize {
        self.board.len()
            + self.draw_pile.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// The count [`Room::card_count`] must equal at all times after
    /// initialization.
    pub fn expected_card_count(&self) -> usize {
        self.total_cards
    }

    /// Every card id currently in the match. Used as the exclusion set when
    /// asking the catalog for a replacement card.
    pub fn card_ids_in_play(&self) -> Vec<CardId> {
        self.board
            .iter()
            .chain(self.draw_pile.iter())
            .chain(self.players.iter().flat_map(|p| p.hand.iter()))
            .map(|c| c.id)
            .collect()
    }

    /// Add a replacement card from the catalog to the bottom of the draw pile.
    /// Only meaningful while the match is running.
    pub fn restock(&mut self, card: Card) {
        if self.phase != RoomPhase::Playing {
            return;
        }
        self.draw_pile.push_back(card);
        self.total_cards += 1;
    }

    /// End the match in favor of the opponent. Valid only while playing.
    /// Returns the winner's id and name.
    pub fn forfeit(&mut self, loser: PlayerId) -> Result<(PlayerId, String), GameError> {
        if self.phase != RoomPhase::Playing {
            return Err(GameError::NotInProgress);
        }
        let (winner_id, winner_name) = self
            .opponent_of(loser)
            .map(|p| (p.id, p.name.clone()))
            .ok_or(GameError::NotInProgress)?;
        self.phase = RoomPhase::Terminated;
        self.winner = Some(winner_id);
        Ok((winner_id, winner_name))
    }

    /// A player dropped mid-match: the survivor wins by abandonment. Returns
    /// the winner's id and name, or None when the room was not playing
    /// (waiting rooms are simply destroyed by the caller).
    pub fn handle_disconnect(&mut self, gone: PlayerId) -> Option<(PlayerId, String)> {
        if self.phase != RoomPhase::Playing {
            return None;
        }
        let (winner_id, winner_name) = self
            .opponent_of(gone)
            .map(|p| (p.id, p.name.clone()))?;
        self.phase = RoomPhase::Terminated;
        self.winner = Some(winner_id);
        Some((winner_id, winner_name))
    }

    /// The redacted snapshot sent to one recipient: full hand contents only
    /// for the viewer, counts for everyone, and no draw pile anywhere.
    pub fn view_for(&self, viewer: PlayerId) -> RoomView {
        RoomView {
            code: self.code.clone(),
            phase: self.phase,
            board: self.board.clone(),
            players: self
                .players
                .iter()
                .map(|p| PlayerPublic {
                    id: p.id,
                    name: p.name.clone(),
                    hand_count: p.hand.len(),
                    hand: (p.id == viewer).then(|| p.hand.clone()),
                })
                .collect(),
            turn: self.turn,
            winner: self.winner,
            last_move: self.last_move.clone(),
        }
    }
}
