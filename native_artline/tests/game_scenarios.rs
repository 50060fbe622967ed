//! Engine-level match scenarios driven through the public API.

use artline_shared::{Card, CardId, PlayerId, RoomCode, RoomPhase, WorkKind};
use native_artline::game::{initialize, Room, INITIAL_HAND_SIZE};

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

fn pool(n: u64) -> Vec<Card> {
    // Distinct years so a correct slot always exists and is easy to compute.
    (0..n).map(|i| card(i, 1000 + (i as i32) * 7)).collect()
}

fn started_room(pool_size: u64) -> Room {
    let mut room = Room::new(
        RoomCode::parse("ABCDEF").unwrap(),
        PlayerId(1),
        "Alice".into(),
    );
    room.add_player(PlayerId(2), "Bob".into()).unwrap();
    initialize(&mut room, pool(pool_size)).unwrap();
    room
}

fn assert_invariants(room: &Room) {
    assert!(
        room.board.windows(2).all(|w| w[0].year <= w[1].year),
        "board must stay sorted by year"
    );
    assert_eq!(
        room.card_count(),
        room.expected_card_count(),
        "no card may be duplicated or lost"
    );
}

/// The slot where `card` fits the sorted board.
fn correct_position(room: &Room, card: &Card) -> usize {
    room.board.partition_point(|b| b.year <= card.year)
}

#[test]
fn perfect_play_reaches_a_winner_with_alternating_turns() {
    let mut room = started_room(20);
    let first_mover = room.turn.unwrap();
    let mut last_turn = None;

    for _ in 0..(2 * INITIAL_HAND_SIZE) {
        if room.phase != RoomPhase::Playing {
            break;
        }
        let turn = room.turn.unwrap();
        assert_ne!(Some(turn), last_turn, "turn must alternate");
        last_turn = Some(turn);

        let hand_card = room.player(turn).unwrap().hand[0].clone();
        let position = correct_position(&room, &hand_card);
        let outcome = room.apply_move(turn, hand_card.id, position).unwrap();
        assert!(outcome.correct);
        assert_invariants(&room);
    }

    assert_eq!(room.phase, RoomPhase::Terminated);
    let winner = room.winner.expect("someone must have won");
    assert!(room.player(winner).unwrap().hand.is_empty());
    // Whoever moved first finished their four cards first.
    assert_eq!(winner, first_mover);
}

#[test]
fn misplays_grow_the_hand_and_never_break_invariants() {
    let mut room = started_room(20);
    let turn = room.turn.unwrap();
    let hand_card = room.player(turn).unwrap().hand[0].clone();

    // A wrong position always exists once a correct one is known: any other
    // slot fails at least one neighbor check unless years collide, and the
    // pool has distinct years.
    let good = correct_position(&room, &hand_card);
    let bad = if good == 0 { room.board.len() } else { 0 };
    let before = room.player(turn).unwrap().hand.len();

    let outcome = room.apply_move(turn, hand_card.id, bad).unwrap();
    assert!(!outcome.correct);
    assert!(outcome.drew_card);
    assert_eq!(room.player(turn).unwrap().hand.len(), before + 1);
    assert_ne!(room.turn, Some(turn));
    assert_invariants(&room);
}

#[test]
fn restock_keeps_the_card_accounting_exact() {
    // Minimum pool: hands plus the seed, nothing left to draw.
    let mut room = started_room(9);
    assert_eq!(room.draw_pile_len(), 0);
    assert_invariants(&room);

    room.restock(card(100, 1500));
    assert_eq!(room.draw_pile_len(), 1);
    assert_invariants(&room);

    // The restocked card is drawable on the next misplay.
    let turn = room.turn.unwrap();
    let hand_card = room.player(turn).unwrap().hand[0].clone();
    let good = correct_position(&room, &hand_card);
    let bad = if good == 0 { room.board.len() } else { 0 };
    let outcome = room.apply_move(turn, hand_card.id, bad).unwrap();
    assert!(outcome.drew_card);
    assert_eq!(room.draw_pile_len(), 0);
    assert_invariants(&room);
}

#[test]
fn forfeit_mid_match_ends_the_room_for_the_opponent() {
    let mut room = started_room(20);
    let turn = room.turn.unwrap();
    let (winner_id, _) = room.forfeit(turn).unwrap();

    assert_ne!(winner_id, turn);
    assert_eq!(room.phase, RoomPhase::Terminated);
    assert_eq!(room.winner, Some(winner_id));
    // Hand sizes play no role in a forfeit.
    assert_eq!(room.player(turn).unwrap().hand.len(), INITIAL_HAND_SIZE);
}

#[test]
fn projection_stays_redacted_for_the_whole_match() {
    let mut room = started_room(12);

    for _ in 0..4 {
        if room.phase != RoomPhase::Playing {
            break;
        }
        let turn = room.turn.unwrap();
        let hand_card = room.player(turn).unwrap().hand[0].clone();
        let position = correct_position(&room, &hand_card);
        room.apply_move(turn, hand_card.id, position).unwrap();

        for viewer in [PlayerId(1), PlayerId(2)] {
            let view = room.view_for(viewer);
            for p in &view.players {
                if p.id == viewer {
                    assert_eq!(p.hand.as_ref().map(Vec::len), Some(p.hand_count));
                } else {
                    assert!(p.hand.is_none(), "opponent hand must stay hidden");
                }
            }
        }
    }
}
