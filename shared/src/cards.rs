//! Artwork card types for the ArtLine timeline game.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card. Sourced from the catalog (the Met API object id),
/// unique within a match.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CardId(pub u64);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad category of an artwork, derived from its department and medium.
/// Drives card coloring on clients.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkKind {
    Painting,
    Sculpture,
    Other,
}

/// A single artwork card. Immutable once constructed; the sort key for the
/// timeline is `year`, while `year_text` carries the human label ("ca. 1880").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub year_text: String,
    pub image: String,
    pub kind: WorkKind,
    pub department: String,
    pub medium: String,
    pub dimensions: String,
    pub culture: String,
    pub country: String,
    pub credit: String,
    pub object_url: String,
}

impl Card {
    /// Short "Title (year)" label used in log lines and move messages.
    pub fn label(&self) -> String {
        format!("\"{}\" — {}", self.title, self.year_text)
    }
}
