//! # recall-search
//!
//! Track search and relevance ranking for recall-notes.
//!
//! This crate turns a free-text query into a short list of track
//! suggestions worth saving to a playlist. It compiles into the
//! `recall-notes` binary as a library dependency.
//!
//! ## Design
//!
//! - Queries the Spotify Web API (client-credentials auth) or a built-in
//!   offline catalog through the [`CatalogSource`] trait
//! - Drops karaoke, live, remix, cover and demo versions by keyword
//! - Deduplicates by catalog id and ranks by popularity, query match
//!   strength and a preference for Japanese-language releases
//! - In-memory query cache with configurable TTL
//! - Graceful degradation: if the live catalog fails, the offline catalog
//!   still answers
//!
//! ## Security
//!
//! - Client secrets and access tokens are redacted from `Debug` output
//! - Search queries are logged only at trace level

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod mock;
pub mod ranking;
pub mod search;
pub mod spotify;
pub mod types;

pub use catalog::CatalogSource;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use mock::MockCatalog;
pub use ranking::{rank, RankingWeights};
pub use search::TrackSearch;
pub use spotify::{ClientCredentials, ClientCredentialsProvider, SpotifyCatalog, TokenProvider};
pub use types::{
    AlbumSummary, AlbumTracks, ArtistSummary, ArtistTracksPage, CatalogKind, RawHit, Suggestion,
};

/// Rank suggestions for `query` from the offline catalog.
///
/// Convenience wrapper around [`TrackSearch`] with a [`MockCatalog`] and
/// the given config.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> recall_search::Result<()> {
/// let config = recall_search::SearchConfig::default();
/// let suggestions = recall_search::suggest_offline("lemon", &config).await?;
/// for suggestion in &suggestions {
///     println!("{} / {}", suggestion.track.title, suggestion.track.artist_display());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn suggest_offline(query: &str, config: &SearchConfig) -> Result<Vec<Suggestion>> {
    let service = TrackSearch::new(MockCatalog::from_config(config), config.clone())?;
    service.suggest(query).await
}
