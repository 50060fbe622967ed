//! Move validation and application.

use artline_shared::{Card, CardId, PlayerId, RoomPhase};

use super::{GameError, Room};

/// What happened when a card was submitted. `message` is the human-readable
/// result echoed back to the mover and recorded on the room.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    pub correct: bool,
    pub message: String,
    pub card_id: CardId,
    pub drew_card: bool,
    pub game_over: bool,
}

/// A placement is correct iff the card's year fits between its would-be
/// neighbors; ties are accepted in either direction, since same-year works may
/// be ordered arbitrarily. An empty board accepts anything.
fn placement_fits(card: &Card, board: &[Card], position: usize) -> bool {
    let prev = position.checked_sub(1).and_then(|i| board.get(i));
    let next = board.get(position);
    prev.map_or(true, |p| card.year >= p.year) && next.map_or(true, |n| card.year <= n.year)
}

impl Room {
    /// Validate and apply one move. Precondition order: match running, then
    /// turn ownership, then card possession; the position is checked last so a
    /// stale client gets the most specific error its request deserves.
    ///
    /// Correct placements move the card hand→board. Incorrect ones leave it in
    /// the hand and draw one card from the pile when there is one; either way
    /// the turn passes to the opponent unless the move just won the match.
    pub fn apply_move(
        &mut self,
        player: PlayerId,
        card_id: CardId,
        position: usize,
    ) -> Result<MoveOutcome, GameError> {
        if self.phase != RoomPhase::Playing {
            return Err(GameError::NotInProgress);
        }
        if self.turn != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        let player_idx = self
            .players
            .iter()
            .position(|p| p.id == player)
            .ok_or(GameError::NotYourTurn)?;
        let card_idx = self.players[player_idx]
            .hand
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(GameError::CardNotInHand)?;
        if position > self.board.len() {
            return Err(GameError::BadPosition {
                position,
                max: self.board.len(),
            });
        }

        let correct = placement_fits(&self.players[player_idx].hand[card_idx], &self.board, position);
        let mut drew_card = false;

        let message = if correct {
            // Hand -> board is one ownership transfer; no aliasing of the card.
            let was_empty = self.board.is_empty();
            let card = self.players[player_idx].hand.remove(card_idx);
            let label = card.label();
            self.board.insert(position, card);
            if was_empty {
                "First card placed!".to_string()
            } else {
                format!("Correct! {label}")
            }
        } else {
            let title = self.players[player_idx].hand[card_idx].title.clone();
            if let Some(drawn) = self.draw_pile.pop_front() {
                self.players[player_idx].hand.push(drawn);
                drew_card = true;
            }
            format!("Incorrect. \"{title}\" does not go there. Draw a card.")
        };

        let game_over = self.players[player_idx].hand.is_empty();
        if game_over {
            self.winner = Some(player);
            self.phase = RoomPhase::Terminated;
        } else {
            // The turn always passes, correct or not.
            self.turn = self.opponent_of(player).map(|p| p.id);
        }
        self.last_move = Some(message.clone());

        tracing::debug!(
            room = %self.code,
            player = %player,
            card = %card_id,
            position,
            correct,
            drew_card,
            game_over,
            "move applied"
        );

        Ok(MoveOutcome {
            correct,
            message,
            card_id,
            drew_card,
            game_over,
        })
    }
}
