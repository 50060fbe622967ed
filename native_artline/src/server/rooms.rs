//! The room registry: code generation, lookup, membership tracking.
//!
//! Two process-wide maps live here (rooms by code, players to room codes);
//! everything else is owned by its room. Each [`RoomEntry`] guards its state
//! behind one `tokio::sync::Mutex`, which is the per-room serialization
//! guarantee: operations against one room run one at a time in arrival order,
//! while different rooms proceed independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{Mutex, RwLock};

use artline_shared::{PlayerId, RoomCode, ServerMsg, CODE_ALPHABET, CODE_LEN};

use crate::game::{GameError, Room};

/// Per-player outbound channel for server messages. Unbounded so broadcasts
/// issued under a room lock never block on a slow client.
pub type PlayerSender = UnboundedSender<ServerMsg>;

pub struct RoomEntry {
    pub code: RoomCode,
    pub inner: Mutex<RoomInner>,
}

pub struct RoomInner {
    pub game: Room,
    /// Outbound channels of the currently-connected members.
    pub senders: HashMap<PlayerId, PlayerSender>,
}

impl RoomInner {
    /// Deliver a message to one member. A closed channel means the client is
    /// already gone; the disconnect path will clean the room up.
    pub fn send_to(&self, id: PlayerId, msg: ServerMsg) {
        if let Some(tx) = self.senders.get(&id) {
            let _ = tx.send(msg);
        }
    }

    pub fn send_all(&self, msg: ServerMsg) {
        for tx in self.senders.values() {
            let _ = tx.send(msg.clone());
        }
    }

    /// Push one redacted snapshot per connected member. Views differ per
    /// recipient, so there is never a single shared broadcast payload.
    pub fn broadcast_views(&self) {
        for (&id, tx) in &self.senders {
            let _ = tx.send(ServerMsg::StateUpdated(self.game.view_for(id)));
        }
    }
}

#[derive(Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomCode, Arc<RoomEntry>>>,
    memberships: RwLock<HashMap<PlayerId, RoomCode>>,
    next_conn_id: AtomicU64,
}

impl RoomRegistry {
    /// Identity for a new connection.
    pub fn alloc_player_id(&self) -> PlayerId {
        PlayerId(self.next_conn_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Create a room owned by `creator` and bind their membership. The name
    /// must already be validated.
    pub async fn create_room(
        &self,
        creator: PlayerId,
        name: String,
        sender: PlayerSender,
    ) -> RoomCode {
        let mut rooms = self.rooms.write().await;
        let code = generate_unique_code(&rooms);
        let game = Room::new(code.clone(), creator, name);
        let mut senders = HashMap::new();
        senders.insert(creator, sender);
        rooms.insert(
            code.clone(),
            Arc::new(RoomEntry {
                code: code.clone(),
                inner: Mutex::new(RoomInner { game, senders }),
            }),
        );
        drop(rooms);

        self.memberships.write().await.insert(creator, code.clone());
        code
    }

    pub async fn find(&self, code: &RoomCode) -> Option<Arc<RoomEntry>> {
        self.rooms.read().await.get(code).cloned()
    }

    /// The room a connection currently belongs to, if any.
    pub async fn lookup(&self, player: PlayerId) -> Option<(RoomCode, Arc<RoomEntry>)> {
        let code = self.memberships.read().await.get(&player).cloned()?;
        let entry = self.find(&code).await?;
        Some((code, entry))
    }

    pub async fn is_member(&self, player: PlayerId) -> bool {
        self.memberships.read().await.contains_key(&player)
    }

    pub async fn bind(&self, player: PlayerId, code: RoomCode) {
        self.memberships.write().await.insert(player, code);
    }

    /// Drop a room and every membership pointing at it. Used on termination
    /// and on empty-room cleanup; removing an already-removed room is fine.
    pub async fn remove_room(&self, code: &RoomCode) {
        self.rooms.write().await.remove(code);
        self.memberships
            .write()
            .await
            .retain(|_, member_of| member_of != code);
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

/// Random 6-character code from the unambiguous alphabet, regenerated until it
/// collides with no live room.
fn generate_unique_code(existing: &HashMap<RoomCode, Arc<RoomEntry>>) -> RoomCode {
    loop {
        let mut rng = rand::rng();
        let code: String = (0..CODE_LEN)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        let code = RoomCode::from_generated(code);
        if !existing.contains_key(&code) {
            return code;
        }
    }
}

/// Parse client-supplied code input, normalizing case.
pub fn parse_code(input: &str) -> Result<RoomCode, GameError> {
    RoomCode::parse(input).ok_or(GameError::MalformedCode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn sender() -> (PlayerSender, mpsc::UnboundedReceiver<ServerMsg>) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn generated_codes_use_the_unambiguous_alphabet() {
        let empty = HashMap::new();
        for _ in 0..200 {
            let code = generate_unique_code(&empty);
            assert_eq!(code.as_str().len(), CODE_LEN);
            assert!(code
                .as_str()
                .bytes()
                .all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[tokio::test]
    async fn create_binds_membership_and_is_findable() {
        let registry = RoomRegistry::default();
        let player = registry.alloc_player_id();
        let (tx, _rx) = sender();

        let code = registry.create_room(player, "Alice".into(), tx).await;
        assert_eq!(registry.room_count().await, 1);

        let (found_code, entry) = registry.lookup(player).await.unwrap();
        assert_eq!(found_code, code);
        assert_eq!(entry.inner.lock().await.game.players.len(), 1);
    }

    #[tokio::test]
    async fn remove_room_sweeps_memberships() {
        let registry = RoomRegistry::default();
        let player = registry.alloc_player_id();
        let (tx, _rx) = sender();

        let code = registry.create_room(player, "Alice".into(), tx).await;
        registry.remove_room(&code).await;

        assert_eq!(registry.room_count().await, 0);
        assert!(registry.lookup(player).await.is_none());
    }

    #[tokio::test]
    async fn distinct_connections_get_distinct_ids() {
        let registry = RoomRegistry::default();
        let a = registry.alloc_player_id();
        let b = registry.alloc_player_id();
        assert_ne!(a, b);
    }
}
