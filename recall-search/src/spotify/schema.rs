//! Typed subset of the Spotify Web API response schema.
//!
//! Only the fields this crate reads are modelled. Defaulting rules:
//!
//! - missing `popularity` → 0
//! - missing `artists` → empty list
//! - missing or empty `images` → no art URL
//! - missing `album` on a track → empty album title, no album id
//! - missing `followers` / `genres` → 0 / empty
//!
//! A missing `id` or `name` is a decode error: a hit without an identity
//! cannot be saved or deduplicated.

use serde::Deserialize;

use crate::types::{AlbumSummary, ArtistSummary, RawHit};

/// Response of `GET /search`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Paging<TrackObject>>,
    #[serde(default)]
    pub artists: Option<Paging<ArtistObject>>,
}

/// A page of items.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

/// Response of `GET /artists/{id}/top-tracks`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageObject {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedArtistObject {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtistObject>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// A full track object (search results, top tracks).
#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtistObject>,
    #[serde(default)]
    pub album: Option<AlbumObject>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

/// A simplified track object (album track listings): no album, no popularity.
#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedTrackObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtistObject>,
}

/// Response of the client-credentials token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

fn first_image(images: &[ImageObject]) -> Option<String> {
    images.first().map(|image| image.url.clone())
}

fn artist_names(artists: &[SimplifiedArtistObject]) -> Vec<String> {
    artists.iter().map(|artist| artist.name.clone()).collect()
}

fn primary_artist_id(artists: &[SimplifiedArtistObject]) -> Option<String> {
    artists.first().and_then(|artist| artist.id.clone())
}

impl From<TrackObject> for RawHit {
    fn from(track: TrackObject) -> Self {
        let (album_title, album_art_url, album_id) = match &track.album {
            Some(album) => (
                album.name.clone(),
                first_image(&album.images),
                Some(album.id.clone()),
            ),
            None => (String::new(), None, None),
        };
        Self {
            artist_names: artist_names(&track.artists),
            primary_artist_id: primary_artist_id(&track.artists),
            album_title,
            album_art_url,
            album_id,
            popularity: track.popularity.unwrap_or(0),
            id: track.id,
            title: track.name,
        }
    }
}

impl SimplifiedTrackObject {
    /// Convert into a hit, filling album fields from the parent album.
    pub fn into_hit(self, album: &AlbumSummary) -> RawHit {
        RawHit {
            artist_names: artist_names(&self.artists),
            primary_artist_id: primary_artist_id(&self.artists),
            album_title: album.title.clone(),
            album_art_url: album.image_url.clone(),
            album_id: Some(album.id.clone()),
            popularity: 0,
            id: self.id,
            title: self.name,
        }
    }
}

impl From<ArtistObject> for ArtistSummary {
    fn from(artist: ArtistObject) -> Self {
        Self {
            image_url: first_image(&artist.images),
            followers: artist.followers.map_or(0, |f| f.total),
            popularity: artist.popularity.unwrap_or(0),
            genres: artist.genres,
            id: artist.id,
            name: artist.name,
        }
    }
}

impl From<AlbumObject> for AlbumSummary {
    fn from(album: AlbumObject) -> Self {
        Self {
            image_url: first_image(&album.images),
            artist_names: artist_names(&album.artists),
            release_date: album.release_date,
            id: album.id,
            title: album.name,
        }
    }
}
