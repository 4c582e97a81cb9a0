//! Track search service: catalog call, offline fallback, ranking, caching.
//!
//! [`TrackSearch`] is the collaborator that sits between a front-end and a
//! [`CatalogSource`]. It owns the query cache and decides when to fall back
//! to the offline catalog; the ranking itself stays a pure function.

use crate::cache::{CacheKey, QueryCache};
use crate::catalog::CatalogSource;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::mock::MockCatalog;
use crate::ranking::{filter_hits, rank_with_weights};
use crate::types::{AlbumTracks, ArtistSummary, ArtistTracksPage, CatalogKind, RawHit, Suggestion};

/// Search and browse a catalog with filtering, ranking and caching applied.
#[derive(Debug)]
pub struct TrackSearch<C> {
    catalog: C,
    fallback: Option<MockCatalog>,
    cache: QueryCache,
    config: SearchConfig,
}

impl<C: CatalogSource> TrackSearch<C> {
    /// Create a service over `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn new(catalog: C, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let fallback = (config.fallback_to_mock && catalog.kind() != CatalogKind::Mock)
            .then(|| MockCatalog::from_config(&config));
        let cache = QueryCache::new(config.cache_capacity, config.cache_ttl_seconds);
        Ok(Self {
            catalog,
            fallback,
            cache,
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Which catalog serves live requests.
    pub fn catalog_kind(&self) -> CatalogKind {
        self.catalog.kind()
    }

    /// Ranked suggestions for `query`, at most `config.max_results`.
    ///
    /// # Errors
    ///
    /// Returns the catalog error when the live call fails and no fallback
    /// is configured.
    pub async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, SearchError> {
        self.suggest_with_limit(query, self.config.max_results).await
    }

    /// Ranked suggestions for `query`, at most `limit`.
    ///
    /// # Pipeline
    ///
    /// 1. Queries shorter than `min_query_length` return nothing
    /// 2. Serve from cache when possible
    /// 3. Fetch `fetch_limit` raw hits from the catalog
    /// 4. On failure, fall back to the offline catalog if enabled
    /// 5. Rank (exclude, dedup, score, sort, truncate)
    /// 6. Cache the result, unless it came from the offline fallback
    pub async fn suggest_with_limit(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, SearchError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < self.config.min_query_length.max(1) {
            return Ok(Vec::new());
        }

        let key = CacheKey::new(trimmed, limit);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(count = cached.len(), "suggestions served from cache");
            return Ok(cached);
        }

        let (hits, from_fallback) = self.fetch_hits(trimmed).await?;
        let suggestions = rank_with_weights(&hits, trimmed, limit, &self.config.weights);
        tracing::debug!(
            hits = hits.len(),
            suggestions = suggestions.len(),
            from_fallback,
            "ranked suggestions"
        );

        // Fallback results are never cached so the next call retries live.
        if !from_fallback {
            self.cache.insert(key, suggestions.clone()).await;
        }
        Ok(suggestions)
    }

    /// Raw hits for `query`, and whether they came from the offline fallback.
    async fn fetch_hits(&self, query: &str) -> Result<(Vec<RawHit>, bool), SearchError> {
        let limit = self.config.fetch_limit;
        match self.catalog.search_tracks(query, limit).await {
            Ok(hits) => {
                tracing::debug!(catalog = %self.catalog.kind(), count = hits.len(), "catalog returned hits");
                Ok((hits, false))
            }
            Err(err) => match &self.fallback {
                Some(mock) => {
                    tracing::warn!(catalog = %self.catalog.kind(), error = %err, "track search failed, using offline catalog");
                    Ok((mock.search_tracks(query, limit).await?, true))
                }
                None => {
                    tracing::warn!(catalog = %self.catalog.kind(), error = %err, "track search failed");
                    Err(err)
                }
            },
        }
    }

    /// Artists matching `query`, at most `config.max_results`.
    pub async fn search_artists(&self, query: &str) -> Result<Vec<ArtistSummary>, SearchError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < self.config.min_query_length.max(1) {
            return Ok(Vec::new());
        }
        let limit = self.config.max_results;
        match self.catalog.search_artists(trimmed, limit).await {
            Ok(artists) => Ok(artists),
            Err(err) => match &self.fallback {
                Some(mock) => {
                    tracing::warn!(error = %err, "artist search failed, using offline catalog");
                    mock.search_artists(trimmed, limit).await
                }
                None => Err(err),
            },
        }
    }

    /// One page of an artist's tracks, most popular first.
    ///
    /// Derivative versions and repeated ids are removed before paging, so
    /// `total` counts only tracks that would be shown. A `limit` of 0 means
    /// `config.max_results`. When the live call fails, ids known to the
    /// offline catalog (such as those from a fallback artist search) are
    /// served from it.
    pub async fn artist_tracks(
        &self,
        artist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<ArtistTracksPage, SearchError> {
        let limit = if limit == 0 { self.config.max_results } else { limit };
        let raw = match self.catalog.artist_top_tracks(artist_id).await {
            Ok(raw) => raw,
            Err(err) => match &self.fallback {
                Some(mock) => match mock.artist_top_tracks(artist_id).await {
                    Ok(raw) => {
                        tracing::warn!(artist_id, error = %err, "artist tracks failed, using offline catalog");
                        raw
                    }
                    Err(_) => return Err(err),
                },
                None => return Err(err),
            },
        };
        let mut tracks = filter_hits(&raw);
        // Stable: equal popularity keeps catalog order.
        tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));

        let total = tracks.len();
        let page: Vec<RawHit> = tracks.into_iter().skip(offset).take(limit).collect();
        let has_more = offset.saturating_add(limit) < total;
        tracing::debug!(artist_id, total, returned = page.len(), "artist tracks page");

        Ok(ArtistTracksPage {
            tracks: page,
            total,
            has_more,
        })
    }

    /// An album and its tracks with derivative versions removed.
    ///
    /// Falls back like [`TrackSearch::artist_tracks`].
    pub async fn album_tracks(&self, album_id: &str) -> Result<AlbumTracks, SearchError> {
        let listing = match self.catalog.album_tracks(album_id).await {
            Ok(listing) => listing,
            Err(err) => match &self.fallback {
                Some(mock) => match mock.album_tracks(album_id).await {
                    Ok(listing) => {
                        tracing::warn!(album_id, error = %err, "album lookup failed, using offline catalog");
                        listing
                    }
                    Err(_) => return Err(err),
                },
                None => return Err(err),
            },
        };
        let AlbumTracks { album, tracks } = listing;
        Ok(AlbumTracks {
            album,
            tracks: filter_hits(&tracks),
        })
    }

    /// Forget every cached suggestion list.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> SearchConfig {
        SearchConfig {
            mock_latency_ms: (0, 0),
            ..Default::default()
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SearchConfig {
            max_results: 0,
            ..offline_config()
        };
        assert!(TrackSearch::new(MockCatalog::instant(), config).is_err());
    }

    #[test]
    fn mock_catalog_gets_no_fallback() {
        let service = TrackSearch::new(MockCatalog::instant(), offline_config()).expect("service");
        assert!(service.fallback.is_none());
        assert_eq!(service.catalog_kind(), CatalogKind::Mock);
    }

    #[tokio::test]
    async fn suggest_filters_and_ranks() {
        let service = TrackSearch::new(MockCatalog::instant(), offline_config()).expect("service");
        let suggestions = service.suggest("lemon").await.expect("suggest");
        let ids: Vec<&str> = suggestions.iter().map(Suggestion::id).collect();
        assert_eq!(ids.first(), Some(&"mock-1"));
        assert!(!ids.contains(&"mock-exclude-1"));
    }

    #[tokio::test]
    async fn short_query_returns_empty() {
        let config = SearchConfig {
            min_query_length: 3,
            ..offline_config()
        };
        let service = TrackSearch::new(MockCatalog::instant(), config).expect("service");
        assert!(service.suggest("le").await.expect("suggest").is_empty());
        assert!(!service.suggest("lem").await.expect("suggest").is_empty());
    }

    #[tokio::test]
    async fn artist_tracks_paginate() {
        let service = TrackSearch::new(MockCatalog::instant(), offline_config()).expect("service");
        // 米津玄師 has two canonical tracks and one karaoke version.
        let first = service.artist_tracks("ar-yonezu", 0, 1).await.expect("page");
        assert_eq!(first.total, 2);
        assert_eq!(first.tracks.len(), 1);
        assert_eq!(first.tracks[0].id, "mock-1");
        assert!(first.has_more);

        let second = service.artist_tracks("ar-yonezu", 1, 1).await.expect("page");
        assert_eq!(second.tracks[0].id, "mock-2");
        assert!(!second.has_more);

        let past_end = service.artist_tracks("ar-yonezu", 5, 10).await.expect("page");
        assert!(past_end.tracks.is_empty());
        assert!(!past_end.has_more);
    }

    #[tokio::test]
    async fn zero_limit_uses_max_results() {
        let config = SearchConfig {
            max_results: 1,
            ..offline_config()
        };
        let service = TrackSearch::new(MockCatalog::instant(), config).expect("service");
        let page = service.artist_tracks("ar-yonezu", 0, 0).await.expect("page");
        assert_eq!(page.tracks.len(), 1);
        assert!(page.has_more);

        let last = service.artist_tracks("ar-yonezu", 1, 0).await.expect("page");
        assert_eq!(last.tracks.len(), 1);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn album_tracks_filtered() {
        let service = TrackSearch::new(MockCatalog::instant(), offline_config()).expect("service");
        let album = service.album_tracks("al-lemon").await.expect("album");
        assert_eq!(album.album.title, "Lemon");
        assert_eq!(album.tracks.len(), 1);
        assert_eq!(album.tracks[0].id, "mock-1");
    }
}
