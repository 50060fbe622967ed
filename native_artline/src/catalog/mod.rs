//! Card catalog providers.
//!
//! The session engine never talks HTTP itself; it is handed a [`CardSource`]
//! at construction. The production source is the Met collection API
//! ([`MetCatalog`]); tests inject deterministic stubs.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use artline_shared::{Card, CardId};

mod met;

pub use met::{MetCatalog, DEFAULT_BASE_URL};

#[async_trait]
pub trait CardSource: Send + Sync {
    /// Fetch up to `count` random cards. May return fewer than requested;
    /// callers treat under-fulfillment below their own minimum as a hard
    /// failure.
    async fn fetch_random_cards(&self, count: usize) -> Result<Vec<Card>>;

    /// Best-effort lookup of one more card not in `exclude`. Bounded retry
    /// internally; `None` means the caller simply goes without.
    async fn fetch_replacement(&self, exclude: &HashSet<CardId>) -> Option<Card>;
}
