use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::CardSource;
use crate::config::Config;
use crate::server::rooms::RoomRegistry;

/// Shared application state exposed to handlers.
///
/// The registry and the card provider are injected at construction so tests
/// can run the full server against their own store and a deterministic
/// catalog.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomRegistry>,
    pub provider: Arc<dyn CardSource>,
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn CardSource>) -> Self {
        Self {
            rooms: Arc::new(RoomRegistry::default()),
            provider,
            config: Arc::new(RwLock::new(config)),
        }
    }
}
