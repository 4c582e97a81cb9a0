//! Core types for catalog hits, ranked suggestions and catalog identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single track returned by a catalog search or listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHit {
    /// Catalog id, unique per catalog item.
    pub id: String,
    /// Track title.
    pub title: String,
    /// Credited artists in catalog order.
    #[serde(default)]
    pub artist_names: Vec<String>,
    /// Title of the album the track appears on. Empty when unknown.
    #[serde(default)]
    pub album_title: String,
    /// Cover art URL of the album, if the catalog provided one.
    #[serde(default)]
    pub album_art_url: Option<String>,
    /// Catalog id of the album.
    #[serde(default)]
    pub album_id: Option<String>,
    /// Catalog id of the first credited artist.
    #[serde(default)]
    pub primary_artist_id: Option<String>,
    /// Catalog popularity, 0–100.
    #[serde(default)]
    pub popularity: u32,
}

impl RawHit {
    /// Create a hit with only an id and title; every other field defaults.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist_names: Vec::new(),
            album_title: String::new(),
            album_art_url: None,
            album_id: None,
            primary_artist_id: None,
            popularity: 0,
        }
    }

    /// Artist names joined for display (`"A, B"`).
    pub fn artist_display(&self) -> String {
        self.artist_names.join(", ")
    }
}

/// A ranked, user-facing suggestion.
///
/// Carries every field of the underlying [`RawHit`]. The score only
/// determines ordering and is not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The catalog hit this suggestion was built from.
    #[serde(flatten)]
    pub track: RawHit,
    #[serde(skip)]
    score: i64,
}

impl Suggestion {
    pub(crate) fn new(track: RawHit, score: i64) -> Self {
        Self { track, score }
    }

    /// The relevance score the ranker assigned.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Catalog id of the suggested track.
    pub fn id(&self) -> &str {
        &self.track.id
    }

    /// Consume the suggestion, returning the underlying hit.
    pub fn into_track(self) -> RawHit {
        self.track
    }
}

/// Artist summary returned by an artist search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
}

/// Album metadata shown on an album detail listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist_names: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// An album together with its (filtered) track list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumTracks {
    pub album: AlbumSummary,
    pub tracks: Vec<RawHit>,
}

/// One page of an artist's track listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistTracksPage {
    /// Tracks on this page, most popular first.
    pub tracks: Vec<RawHit>,
    /// Number of tracks available across all pages after filtering.
    pub total: usize,
    /// Whether another page follows this one.
    pub has_more: bool,
}

/// Catalog backends that can serve searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    /// The live Spotify Web API.
    Spotify,
    /// Built-in offline data set, used in development and as a fallback.
    Mock,
}

impl CatalogKind {
    /// Returns the human-readable name of this catalog.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::Mock => "Mock",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
