//! Match initialization: shuffle, deal, seed the board.

use std::collections::VecDeque;

use artline_shared::{Card, RoomPhase};
use rand::seq::SliceRandom;
use rand::Rng;

use super::{GameError, Room};

/// Cards dealt to each player at the start of a match.
pub const INITIAL_HAND_SIZE: usize = 4;

/// Turn the supplied card pool into a running match: uniform shuffle, deal
/// [`INITIAL_HAND_SIZE`] cards to each player in turn order, seed the board
/// with one card, and leave the remainder as the draw pile. The starting
/// player is chosen uniformly at random.
///
/// Fails without touching the room when the pool cannot cover the initial
/// hands plus the board seed; the caller is expected to tear the room down.
pub fn initialize(room: &mut Room, mut pool: Vec<Card>) -> Result<(), GameError> {
    let needed = INITIAL_HAND_SIZE * room.players.len() + 1;
    if pool.len() < needed {
        return Err(GameError::InsufficientCards {
            needed,
            got: pool.len(),
        });
    }

    // Fisher-Yates via rand; never a comparator-based shuffle.
    pool.shuffle(&mut rand::rng());
    room.total_cards = pool.len();

    let mut deck: VecDeque<Card> = pool.into();
    for p in &mut room.players {
        for _ in 0..INITIAL_HAND_SIZE {
            let card = deck.pop_front().ok_or(GameError::InsufficientCards {
                needed,
                got: 0,
            })?;
            p.hand.push(card);
        }
    }

    // One card anchors the timeline; a single card is trivially sorted.
    let seed = deck.pop_front().ok_or(GameError::InsufficientCards { needed, got: 0 })?;
    room.board.push(seed);
    room.draw_pile = deck;

    let starter = room.players[rand::rng().random_range(0..room.players.len())].id;
    room.turn = Some(starter);
    room.phase = RoomPhase::Playing;
    room.last_move = Some("The match has begun! Place your works in chronological order.".into());

    tracing::info!(
        room = %room.code,
        cards = room.total_cards,
        pile = room.draw_pile.len(),
        starter = %starter,
        "match initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use artline_shared::{CardId, PlayerId, RoomCode, WorkKind};

    fn card(id: u64, year: i32) -> Card {
        Card {
            id: CardId(id),
            title: format!("Work {id}"),
            artist: "Unknown artist".into(),
            year,
            year_text: year.to_string(),
            image: String::new(),
            kind: WorkKind::Other,
            department: String::new(),
            medium: String::new(),
            dimensions: String::new(),
            culture: String::new(),
            country: String::new(),
            credit: String::new(),
            object_url: String::new(),
        }
    }

    fn two_player_room() -> Room {
        let mut room = Room::new(
            RoomCode::parse("ABCDEF").unwrap(),
            PlayerId(1),
            "Alice".into(),
        );
        room.add_player(PlayerId(2), "Bob".into()).unwrap();
        room
    }

    fn pool(n: u64) -> Vec<Card> {
        (0..n).map(|i| card(i, 1000 + i as i32)).collect()
    }

    #[test]
    fn deals_hands_seed_and_pile() {
        let mut room = two_player_room();
        initialize(&mut room, pool(20)).unwrap();

        assert_eq!(room.phase, RoomPhase::Playing);
        assert_eq!(room.players[0].hand.len(), INITIAL_HAND_SIZE);
        assert_eq!(room.players[1].hand.len(), INITIAL_HAND_SIZE);
        assert_eq!(room.board.len(), 1);
        assert_eq!(room.draw_pile_len(), 20 - 2 * INITIAL_HAND_SIZE - 1);
        assert_eq!(room.card_count(), room.expected_card_count());

        let turn = room.turn.unwrap();
        assert!(room.players.iter().any(|p| p.id == turn));
    }

    #[test]
    fn exactly_the_minimum_pool_leaves_an_empty_pile() {
        let mut room = two_player_room();
        initialize(&mut room, pool(9)).unwrap();
        assert_eq!(room.draw_pile_len(), 0);
        assert_eq!(room.board.len(), 1);
    }

    #[test]
    fn short_pool_fails_without_dealing() {
        let mut room = two_player_room();
        let err = initialize(&mut room, pool(8)).unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientCards { needed: 9, got: 8 }
        ));
        assert_eq!(room.phase, RoomPhase::Waiting);
        assert!(room.players.iter().all(|p| p.hand.is_empty()));
        assert!(room.board.is_empty());
    }

    #[test]
    fn no_card_is_duplicated_or_lost_by_the_deal() {
        let mut room = two_player_room();
        initialize(&mut room, pool(15)).unwrap();

        let mut seen: Vec<u64> = room.card_ids_in_play().iter().map(|c| c.0).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..15).collect::<Vec<_>>());
    }
}
