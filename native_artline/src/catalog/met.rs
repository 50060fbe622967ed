//! Card source backed by the Metropolitan Museum collection API.
//!
//! The API is public and unauthenticated: <https://metmuseum.github.io/>.
//! Object IDs are searched per department, cached in memory for a while, and
//! detail lookups run in small parallel batches so a match can be dealt
//! without hammering the endpoint one request at a time.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tokio::sync::RwLock;

use artline_shared::{Card, CardId, WorkKind};

use super::CardSource;

pub const DEFAULT_BASE_URL: &str = "https://collectionapi.metmuseum.org/public/collection/v1";

/// Departments with large public-domain holdings that carry images:
/// Asian, European Paintings, Greek and Roman, Islamic, Modern, Egyptian,
/// Ancient Near Eastern.
const DEPARTMENT_IDS: &[u32] = &[6, 11, 13, 15, 21, 10, 3];

const ID_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Detail lookups per parallel batch.
const DETAIL_BATCH: usize = 10;

/// How many random IDs to try before giving up on a replacement card.
const REPLACEMENT_ATTEMPTS: usize = 50;

pub struct MetCatalog {
    http: reqwest::Client,
    base_url: String,
    ids: RwLock<IdCache>,
}

#[derive(Default)]
struct IdCache {
    ids: Vec<u64>,
    loaded_at: Option<Instant>,
}

impl IdCache {
    fn fresh(&self) -> bool {
        !self.ids.is_empty()
            && self
                .loaded_at
                .is_some_and(|at| at.elapsed() < ID_CACHE_TTL)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(rename = "objectIDs")]
    object_ids: Option<Vec<u64>>,
}

/// The raw object record, limited to the fields we map onto a [`Card`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetObject {
    #[serde(rename = "objectID")]
    object_id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    artist_display_name: String,
    #[serde(default)]
    object_begin_date: i32,
    #[serde(default)]
    object_end_date: i32,
    #[serde(default)]
    object_date: String,
    #[serde(default)]
    primary_image_small: String,
    #[serde(default)]
    primary_image: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    medium: String,
    #[serde(default)]
    dimensions: String,
    #[serde(default)]
    culture: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    credit_line: String,
    #[serde(rename = "objectURL", default)]
    object_url: String,
}

/// Coarse kind detection over department and medium keywords, used for card
/// coloring on clients.
fn detect_kind(department: &str, medium: &str) -> WorkKind {
    let dep = department.to_lowercase();
    let med = medium.to_lowercase();
    if dep.contains("painting")
        || med.contains("oil")
        || med.contains("tempera")
        || med.contains("acrylic")
        || med.contains("watercolor")
    {
        return WorkKind::Painting;
    }
    if dep.contains("sculpture")
        || med.contains("marble")
        || med.contains("bronze")
        || med.contains("terracotta")
        || med.contains("stone")
    {
        return WorkKind::Sculpture;
    }
    WorkKind::Other
}

/// Map a raw object onto a card. The end date is the most reliable "official"
/// year, with the begin date as fallback. Entries without a usable year, an
/// image, or a title are unusable for the timeline and dropped.
fn to_card(obj: MetObject) -> Option<Card> {
    let year = if obj.object_end_date != 0 {
        obj.object_end_date
    } else {
        obj.object_begin_date
    };
    if year == 0 {
        return None;
    }
    let image = if !obj.primary_image_small.is_empty() {
        obj.primary_image_small
    } else if !obj.primary_image.is_empty() {
        obj.primary_image
    } else {
        return None;
    };
    if obj.title.is_empty() {
        return None;
    }

    let kind = detect_kind(&obj.department, &obj.medium);
    let year_text = if obj.object_date.is_empty() {
        year.to_string()
    } else {
        obj.object_date
    };
    let artist = if obj.artist_display_name.is_empty() {
        "Unknown artist".to_string()
    } else {
        obj.artist_display_name
    };
    let object_url = if obj.object_url.is_empty() {
        format!(
            "https://www.metmuseum.org/art/collection/search/{}",
            obj.object_id
        )
    } else {
        obj.object_url
    };

    Some(Card {
        id: CardId(obj.object_id),
        title: obj.title,
        artist,
        year,
        year_text,
        image,
        kind,
        department: obj.department,
        medium: obj.medium,
        dimensions: obj.dimensions,
        culture: obj.culture,
        country: obj.country,
        credit: obj.credit_line,
        object_url,
    })
}

impl MetCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            ids: RwLock::new(IdCache::default()),
        }
    }

    /// The cached pool of searchable object IDs, reloading when stale. One
    /// search per department runs concurrently; a department that fails is
    /// skipped rather than failing the whole reload.
    async fn object_ids(&self) -> Result<Vec<u64>> {
        {
            let cache = self.ids.read().await;
            if cache.fresh() {
                return Ok(cache.ids.clone());
            }
        }

        tracing::info!("reloading Met object id cache");
        let searches = DEPARTMENT_IDS.iter().map(|dept| {
            let url = format!(
                "{}/search?hasImages=true&isPublicDomain=true&q=*&departmentId={}",
                self.base_url, dept
            );
            let http = self.http.clone();
            async move {
                let resp: SearchResponse = http.get(&url).send().await?.json().await?;
                anyhow::Ok(resp.object_ids.unwrap_or_default())
            }
        });

        let mut all: Vec<u64> = Vec::new();
        for result in futures::future::join_all(searches).await {
            match result {
                Ok(ids) => all.extend(ids),
                Err(e) => tracing::warn!(error = %e, "department search failed"),
            }
        }

        let mut deduped: Vec<u64> = all
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if deduped.is_empty() {
            anyhow::bail!("no artworks available from the Met API");
        }
        deduped.shuffle(&mut rand::rng());

        let mut cache = self.ids.write().await;
        cache.ids = deduped.clone();
        cache.loaded_at = Some(Instant::now());
        tracing::info!(ids = deduped.len(), "Met object id cache loaded");
        Ok(deduped)
    }

    /// Fetch one object's details. Any failure (missing object, junk record)
    /// is just a skip.
    async fn fetch_object(&self, id: u64) -> Option<Card> {
        let url = format!("{}/objects/{}", self.base_url, id);
        let resp = self.http.get(&url).send().await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let obj: MetObject = resp.json().await.ok()?;
        to_card(obj)
    }
}

#[async_trait]
impl CardSource for MetCatalog {
    async fn fetch_random_cards(&self, count: usize) -> Result<Vec<Card>> {
        let ids = self
            .object_ids()
            .await
            .context("loading Met object ids")?;

        // Rotate the cached pool from a random start so consecutive matches
        // do not replay the same artworks.
        let start = rand::rng().random_range(0..ids.len());
        let mut candidates = ids[start..].iter().chain(ids[..start].iter());

        let mut cards: Vec<Card> = Vec::with_capacity(count);
        loop {
            let batch: Vec<u64> = candidates.by_ref().take(DETAIL_BATCH).copied().collect();
            if batch.is_empty() || cards.len() >= count {
                break;
            }
            let fetched =
                futures::future::join_all(batch.into_iter().map(|id| self.fetch_object(id))).await;
            for card in fetched.into_iter().flatten() {
                if cards.len() < count {
                    cards.push(card);
                }
            }
            tracing::debug!(got = cards.len(), want = count, "catalog batch complete");
        }

        if cards.len() < count {
            tracing::warn!(got = cards.len(), want = count, "catalog under-fulfilled");
        }
        Ok(cards)
    }

    async fn fetch_replacement(&self, exclude: &HashSet<CardId>) -> Option<Card> {
        let ids = self.object_ids().await.ok()?;
        for _ in 0..REPLACEMENT_ATTEMPTS {
            let id = ids[rand::rng().random_range(0..ids.len())];
            if exclude.contains(&CardId(id)) {
                continue;
            }
            if let Some(card) = self.fetch_object(id).await {
                return Some(card);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(overrides: impl FnOnce(&mut MetObject)) -> MetObject {
        let mut obj = MetObject {
            object_id: 7,
            title: "Wheat Field with Cypresses".into(),
            artist_display_name: "Vincent van Gogh".into(),
            object_begin_date: 1889,
            object_end_date: 1889,
            object_date: "1889".into(),
            primary_image_small: "https://example.org/wheat.jpg".into(),
            primary_image: String::new(),
            department: "European Paintings".into(),
            medium: "Oil on canvas".into(),
            dimensions: String::new(),
            culture: String::new(),
            country: String::new(),
            credit_line: String::new(),
            object_url: String::new(),
        };
        overrides(&mut obj);
        obj
    }

    #[test]
    fn transform_maps_year_and_kind() {
        let card = to_card(raw(|_| {})).unwrap();
        assert_eq!(card.id, CardId(7));
        assert_eq!(card.year, 1889);
        assert_eq!(card.kind, WorkKind::Painting);
        // No objectURL in the record: synthesized from the object id.
        assert!(card.object_url.ends_with("/7"));
    }

    #[test]
    fn transform_falls_back_to_begin_date() {
        let card = to_card(raw(|o| {
            o.object_end_date = 0;
            o.object_begin_date = 1850;
        }))
        .unwrap();
        assert_eq!(card.year, 1850);
    }

    #[test]
    fn transform_drops_unusable_records() {
        assert!(to_card(raw(|o| {
            o.object_begin_date = 0;
            o.object_end_date = 0;
        }))
        .is_none());
        assert!(to_card(raw(|o| {
            o.primary_image_small = String::new();
            o.primary_image = String::new();
        }))
        .is_none());
        assert!(to_card(raw(|o| o.title = String::new())).is_none());
    }

    #[test]
    fn kind_detection_prefers_painting_keywords() {
        assert_eq!(detect_kind("Egyptian Art", "limestone"), WorkKind::Sculpture);
        assert_eq!(detect_kind("Asian Art", "watercolor on silk"), WorkKind::Painting);
        assert_eq!(detect_kind("Islamic Art", "silk brocade"), WorkKind::Other);
    }
}
