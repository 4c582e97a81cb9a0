//! Offline catalog with a small built-in data set of Japanese pop tracks.
//!
//! Used when no catalog credentials are configured and as the fallback when
//! the live catalog fails. Derivative versions (karaoke, live, cover) are
//! included on purpose so the exclusion filter has something to remove.

use std::time::Duration;

use rand::Rng;

use crate::catalog::CatalogSource;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{AlbumSummary, AlbumTracks, ArtistSummary, CatalogKind, RawHit};

/// `(id, title, artist, artist_id, album, album_id, popularity)`
type TrackRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
);

const TRACKS: &[TrackRow] = &[
    ("mock-1", "Lemon", "米津玄師", "ar-yonezu", "Lemon", "al-lemon", 85),
    ("mock-2", "レモン", "米津玄師", "ar-yonezu", "STRAY SHEEP", "al-stray-sheep", 70),
    ("mock-3", "Pretender", "Official髭男dism", "ar-higedan", "Traveler", "al-traveler", 88),
    ("mock-4", "マリーゴールド", "あいみょん", "ar-aimyon", "瞬間的シックスセンス", "al-shunkan", 80),
    ("mock-5", "White Love", "SPEED", "ar-speed", "White Love", "al-white-love", 60),
    ("mock-6", "紅蓮華", "LiSA", "ar-lisa", "LEO-NiNE", "al-leo-nine", 78),
    ("mock-7", "Dynamite", "BTS", "ar-bts", "BE", "al-be", 90),
    ("mock-8", "レイニーブルー", "徳永英明", "ar-tokunaga", "BIRDS", "al-birds", 45),
    ("mock-9", "ランドマーク", "PEOPLE 1", "ar-people1", "Ghost", "al-ghost", 50),
    ("mock-10", "ドライフラワー", "優里", "ar-yuuri", "壱", "al-ichi", 82),
    ("mock-exclude-1", "Lemon (カラオケ)", "米津玄師", "ar-yonezu", "Lemon", "al-lemon", 40),
    ("mock-exclude-2", "Pretender (Live at 東京ドーム)", "Official髭男dism", "ar-higedan", "Traveler", "al-traveler", 55),
    ("mock-exclude-3", "マリーゴールド (歌ってみた)", "あいみょん", "ar-aimyon", "瞬間的シックスセンス", "al-shunkan", 30),
];

/// `(id, name, genres, followers, popularity)`
const ARTISTS: &[(&str, &str, &[&str], u64, u32)] = &[
    ("ar-yonezu", "米津玄師", &["j-pop"], 6_000_000, 80),
    ("ar-higedan", "Official髭男dism", &["j-pop", "j-rock"], 4_000_000, 78),
    ("ar-aimyon", "あいみょん", &["j-pop"], 2_500_000, 74),
    ("ar-speed", "SPEED", &["j-pop"], 300_000, 48),
    ("ar-lisa", "LiSA", &["anime", "j-pop"], 3_000_000, 72),
    ("ar-bts", "BTS", &["k-pop"], 70_000_000, 88),
    ("ar-tokunaga", "徳永英明", &["j-pop"], 200_000, 40),
    ("ar-people1", "PEOPLE 1", &["j-rock"], 150_000, 45),
    ("ar-yuuri", "優里", &["j-pop"], 1_200_000, 70),
];

/// Kana spellings typed while searching for a romanised title.
const QUERY_ALIASES: &[(&str, &str)] = &[("れも", "lemon"), ("レモ", "lemon"), ("lemo", "lemon")];

fn art_url(album_id: &str) -> String {
    format!("https://mock.invalid/art/{album_id}.jpg")
}

fn row_to_hit(row: &TrackRow) -> RawHit {
    let (id, title, artist, artist_id, album, album_id, popularity) = *row;
    RawHit {
        id: id.into(),
        title: title.into(),
        artist_names: vec![artist.into()],
        album_title: album.into(),
        album_art_url: Some(art_url(album_id)),
        album_id: Some(album_id.into()),
        primary_artist_id: Some(artist_id.into()),
        popularity,
    }
}

fn not_found(context: &str) -> SearchError {
    SearchError::Status {
        status: 404,
        context: context.to_string(),
    }
}

/// Offline catalog serving the built-in data set.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    latency_ms: (u64, u64),
}

impl MockCatalog {
    /// Create a catalog that sleeps a random duration within `latency_ms`
    /// before answering.
    pub fn new(latency_ms: (u64, u64)) -> Self {
        Self { latency_ms }
    }

    /// Create a catalog with the latency range from `config`.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.mock_latency_ms)
    }

    /// Create a catalog that answers immediately.
    pub fn instant() -> Self {
        Self::new((0, 0))
    }

    fn pick_delay(&self) -> Duration {
        let (min, max) = self.latency_ms;
        if max == 0 || min > max {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    async fn simulate_latency(&self) {
        let delay = self.pick_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn matches(row: &TrackRow, query: &str) -> bool {
        let title = row.1.to_lowercase();
        let artist = row.2.to_lowercase();
        if title.contains(query) || artist.contains(query) {
            return true;
        }
        QUERY_ALIASES
            .iter()
            .any(|(alias, target)| query == *alias && title.contains(target))
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl CatalogSource for MockCatalog {
    async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<RawHit>, SearchError> {
        tracing::trace!(query, limit, "mock track search");
        self.simulate_latency().await;

        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(TRACKS
            .iter()
            .filter(|row| Self::matches(row, &query))
            .take(limit)
            .map(row_to_hit)
            .collect())
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ArtistSummary>, SearchError> {
        tracing::trace!(query, limit, "mock artist search");
        self.simulate_latency().await;

        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(ARTISTS
            .iter()
            .filter(|(_, name, ..)| name.to_lowercase().contains(&query))
            .take(limit)
            .map(|(id, name, genres, followers, popularity)| ArtistSummary {
                id: (*id).into(),
                name: (*name).into(),
                image_url: None,
                followers: *followers,
                genres: genres.iter().map(|g| (*g).to_string()).collect(),
                popularity: *popularity,
            })
            .collect())
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<RawHit>, SearchError> {
        self.simulate_latency().await;

        if !ARTISTS.iter().any(|(id, ..)| *id == artist_id) {
            return Err(not_found("artist top tracks"));
        }
        let mut tracks: Vec<RawHit> = TRACKS
            .iter()
            .filter(|row| row.3 == artist_id)
            .map(row_to_hit)
            .collect();
        tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        Ok(tracks)
    }

    async fn album_tracks(&self, album_id: &str) -> Result<AlbumTracks, SearchError> {
        self.simulate_latency().await;

        let tracks: Vec<RawHit> = TRACKS
            .iter()
            .filter(|row| row.5 == album_id)
            .map(row_to_hit)
            .collect();
        let first = tracks.first().ok_or_else(|| not_found("album lookup"))?;
        let album = AlbumSummary {
            id: album_id.to_string(),
            title: first.album_title.clone(),
            artist_names: first.artist_names.clone(),
            image_url: first.album_art_url.clone(),
            release_date: None,
        };
        Ok(AlbumTracks { album, tracks })
    }

    fn kind(&self) -> CatalogKind {
        CatalogKind::Mock
    }
}
