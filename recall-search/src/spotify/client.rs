//! Spotify Web API catalog client.

use serde::de::DeserializeOwned;
use url::Url;

use crate::catalog::CatalogSource;
use crate::config::{SearchConfig, MAX_FETCH_LIMIT};
use crate::error::SearchError;
use crate::http;
use crate::types::{AlbumSummary, AlbumTracks, ArtistSummary, CatalogKind, RawHit};

use super::schema::{AlbumObject, Paging, SearchResponse, SimplifiedTrackObject, TopTracksResponse};
use super::token::TokenProvider;

/// Catalog backed by the Spotify Web API.
///
/// Generic over the [`TokenProvider`] so callers decide how tokens are
/// obtained and how long they are cached.
#[derive(Debug)]
pub struct SpotifyCatalog<T> {
    client: reqwest::Client,
    base_url: Url,
    market: String,
    tokens: T,
}

impl<T: TokenProvider> SpotifyCatalog<T> {
    /// Build a client against `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the base URL is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(tokens: T, config: &SearchConfig) -> Result<Self, SearchError> {
        let mut raw = config.api_base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|e| SearchError::Config(format!("api_base_url is not a valid URL: {e}")))?;
        Ok(Self {
            client: http::build_client(config)?,
            base_url,
            market: config.market.clone(),
            tokens,
        })
    }

    /// Build an endpoint URL from percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SearchError::Config("api_base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authenticated GET returning the decoded JSON body.
    async fn get_json<R: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        context: &str,
    ) -> Result<R, SearchError> {
        let token = self.tokens.token().await?;

        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&token.value)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(context, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                context: context.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest(context, e))?;
        tracing::trace!(bytes = body.len(), context, "catalog response received");

        serde_json::from_str(&body).map_err(|e| SearchError::Parse(format!("{context}: {e}")))
    }

    fn page_size(limit: usize) -> String {
        limit.clamp(1, MAX_FETCH_LIMIT).to_string()
    }

    async fn album_metadata(&self, album_id: &str) -> Result<AlbumSummary, SearchError> {
        let url = self.endpoint(&["albums", album_id])?;
        let album: AlbumObject = self
            .get_json(url, &[("market", self.market.clone())], "album lookup")
            .await?;
        Ok(album.into())
    }

    async fn album_listing(
        &self,
        album_id: &str,
    ) -> Result<Vec<SimplifiedTrackObject>, SearchError> {
        let url = self.endpoint(&["albums", album_id, "tracks"])?;
        let page: Paging<SimplifiedTrackObject> = self
            .get_json(
                url,
                &[
                    ("limit", Self::page_size(MAX_FETCH_LIMIT)),
                    ("market", self.market.clone()),
                ],
                "album tracks",
            )
            .await?;
        Ok(page.items)
    }
}

impl<T: TokenProvider> CatalogSource for SpotifyCatalog<T> {
    async fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<RawHit>, SearchError> {
        tracing::trace!(query, limit, "Spotify track search");
        let url = self.endpoint(&["search"])?;
        let response: SearchResponse = self
            .get_json(
                url,
                &[
                    ("q", query.to_string()),
                    ("type", "track".into()),
                    ("limit", Self::page_size(limit)),
                    ("market", self.market.clone()),
                ],
                "track search",
            )
            .await?;

        Ok(response
            .tracks
            .map(|page| page.items.into_iter().map(RawHit::from).collect())
            .unwrap_or_default())
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ArtistSummary>, SearchError> {
        tracing::trace!(query, limit, "Spotify artist search");
        let url = self.endpoint(&["search"])?;
        let response: SearchResponse = self
            .get_json(
                url,
                &[
                    ("q", query.to_string()),
                    ("type", "artist".into()),
                    ("limit", Self::page_size(limit)),
                    ("market", self.market.clone()),
                ],
                "artist search",
            )
            .await?;

        Ok(response
            .artists
            .map(|page| page.items.into_iter().map(ArtistSummary::from).collect())
            .unwrap_or_default())
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<RawHit>, SearchError> {
        let url = self.endpoint(&["artists", artist_id, "top-tracks"])?;
        let response: TopTracksResponse = self
            .get_json(url, &[("market", self.market.clone())], "artist top tracks")
            .await?;
        Ok(response.tracks.into_iter().map(RawHit::from).collect())
    }

    async fn album_tracks(&self, album_id: &str) -> Result<AlbumTracks, SearchError> {
        let (album, listing) =
            futures::future::try_join(self.album_metadata(album_id), self.album_listing(album_id))
                .await?;
        let tracks = listing
            .into_iter()
            .map(|track| track.into_hit(&album))
            .collect();
        Ok(AlbumTracks { album, tracks })
    }

    fn kind(&self) -> CatalogKind {
        CatalogKind::Spotify
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::token::StaticTokenProvider;

    fn catalog(base: &str) -> SpotifyCatalog<StaticTokenProvider> {
        let config = SearchConfig {
            api_base_url: base.into(),
            ..Default::default()
        };
        SpotifyCatalog::new(StaticTokenProvider::new("t"), &config).expect("catalog")
    }

    #[test]
    fn endpoint_appends_segments() {
        let catalog = catalog("https://api.example.com/v1/");
        let url = catalog.endpoint(&["artists", "abc", "top-tracks"]).expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/v1/artists/abc/top-tracks");
    }

    #[test]
    fn base_without_trailing_slash_is_accepted() {
        let catalog = catalog("https://api.example.com/v1");
        let url = catalog.endpoint(&["search"]).expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/v1/search");
    }

    #[test]
    fn ids_are_percent_encoded() {
        let catalog = catalog("https://api.example.com/v1/");
        let url = catalog.endpoint(&["albums", "a/b c"]).expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/v1/albums/a%2Fb%20c");
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(SpotifyCatalog::<StaticTokenProvider>::page_size(0), "1");
        assert_eq!(SpotifyCatalog::<StaticTokenProvider>::page_size(20), "20");
        assert_eq!(SpotifyCatalog::<StaticTokenProvider>::page_size(500), "50");
    }

    #[test]
    fn kind_is_spotify() {
        assert_eq!(catalog("https://api.example.com/").kind(), CatalogKind::Spotify);
    }

    #[test]
    fn invalid_base_rejected() {
        let config = SearchConfig {
            api_base_url: "::nope".into(),
            ..Default::default()
        };
        assert!(SpotifyCatalog::new(StaticTokenProvider::new("t"), &config).is_err());
    }
}
