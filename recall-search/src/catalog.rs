//! Trait definition for pluggable music catalog backends.
//!
//! The live Spotify client and the offline mock catalog both implement
//! [`CatalogSource`] so the search service can treat them uniformly and
//! fall back from one to the other.

use crate::error::SearchError;
use crate::types::{AlbumTracks, ArtistSummary, CatalogKind, RawHit};

/// A music catalog that can be searched and browsed.
///
/// Implementors translate catalog-specific responses into [`RawHit`] and
/// friends. They do not filter or rank: that is the job of
/// [`crate::ranking`]. Each implementation handles its own:
///
/// - Request construction and query encoding
/// - Authentication
/// - Response decoding with explicit defaulting of missing fields
///
/// All implementations must be `Send + Sync` so one instance can serve
/// concurrent requests.
pub trait CatalogSource: Send + Sync {
    /// Free-text track search returning at most `limit` raw hits.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails or the response cannot
    /// be decoded.
    fn search_tracks(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, SearchError>> + Send;

    /// Free-text artist search returning at most `limit` artists.
    fn search_artists(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ArtistSummary>, SearchError>> + Send;

    /// An artist's most popular tracks, in catalog order.
    fn artist_top_tracks(
        &self,
        artist_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, SearchError>> + Send;

    /// An album's metadata and its tracks, in disc order.
    fn album_tracks(
        &self,
        album_id: &str,
    ) -> impl std::future::Future<Output = Result<AlbumTracks, SearchError>> + Send;

    /// Returns which [`CatalogKind`] this implementation represents.
    fn kind(&self) -> CatalogKind;
}
