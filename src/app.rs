//! Application layer: catalog selection and playlist commands.
//!
//! [`RecallApp`] ties a [`TrackSearch`] to a [`PlaylistStore`]. The
//! binary picks the catalog at startup through [`AppCatalog`].

use recall_search::{
    AlbumTracks, ArtistSummary, CatalogKind, CatalogSource, ClientCredentialsProvider, MockCatalog,
    RawHit, SpotifyCatalog, TrackSearch,
};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::playlist::{NewEntry, PlaylistEntry, PlaylistStore};

/// The catalog chosen at startup.
pub enum AppCatalog {
    Spotify(SpotifyCatalog<ClientCredentialsProvider>),
    Mock(MockCatalog),
}

impl AppCatalog {
    /// Spotify when credentials are configured and `offline` is false,
    /// the offline catalog otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Search`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, offline: bool) -> Result<Self> {
        if offline {
            return Ok(Self::Mock(MockCatalog::from_config(&config.search)));
        }
        match config.spotify.credentials() {
            Some(credentials) => {
                let tokens = ClientCredentialsProvider::new(credentials, &config.search)?;
                Ok(Self::Spotify(SpotifyCatalog::new(tokens, &config.search)?))
            }
            None => {
                tracing::warn!("Spotify credentials not configured, using offline catalog");
                Ok(Self::Mock(MockCatalog::from_config(&config.search)))
            }
        }
    }
}

impl CatalogSource for AppCatalog {
    async fn search_tracks(&self, query: &str, limit: usize) -> recall_search::Result<Vec<RawHit>> {
        match self {
            Self::Spotify(c) => c.search_tracks(query, limit).await,
            Self::Mock(c) => c.search_tracks(query, limit).await,
        }
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: usize,
    ) -> recall_search::Result<Vec<ArtistSummary>> {
        match self {
            Self::Spotify(c) => c.search_artists(query, limit).await,
            Self::Mock(c) => c.search_artists(query, limit).await,
        }
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> recall_search::Result<Vec<RawHit>> {
        match self {
            Self::Spotify(c) => c.artist_top_tracks(artist_id).await,
            Self::Mock(c) => c.artist_top_tracks(artist_id).await,
        }
    }

    async fn album_tracks(&self, album_id: &str) -> recall_search::Result<AlbumTracks> {
        match self {
            Self::Spotify(c) => c.album_tracks(album_id).await,
            Self::Mock(c) => c.album_tracks(album_id).await,
        }
    }

    fn kind(&self) -> CatalogKind {
        match self {
            Self::Spotify(c) => c.kind(),
            Self::Mock(c) => c.kind(),
        }
    }
}

/// Search service plus the user's saved songs.
pub struct RecallApp<C> {
    search: TrackSearch<C>,
    store: PlaylistStore,
}

impl<C: CatalogSource> RecallApp<C> {
    pub fn new(search: TrackSearch<C>, store: PlaylistStore) -> Self {
        Self { search, store }
    }

    pub fn search(&self) -> &TrackSearch<C> {
        &self.search
    }

    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    /// Search for `query` and save suggestion number `pick` (1-based) to
    /// `user_id`'s playlist, persisting the store.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if fewer than `pick` suggestions came back
    /// - [`AppError::DuplicateEntry`] if the user already saved the song
    /// - [`AppError::Storage`] if the playlist cannot be written; the entry
    ///   is then dropped from memory too
    pub async fn add_from_query(
        &mut self,
        user_id: &str,
        query: &str,
        pick: usize,
    ) -> Result<PlaylistEntry> {
        let suggestions = self.search.suggest(query).await?;
        let chosen = pick
            .checked_sub(1)
            .and_then(|index| suggestions.get(index))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "suggestion {pick} for \"{query}\" ({} available)",
                    suggestions.len()
                ))
            })?;

        let entry = self
            .store
            .add(NewEntry::from_suggestion(user_id, chosen))?
            .clone();
        if let Err(err) = self.store.save() {
            self.store.remove(entry.id)?;
            return Err(err);
        }
        Ok(entry)
    }

    /// Remove entry `id` and persist the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has that id, or
    /// [`AppError::Storage`] if the playlist cannot be written, in which
    /// case the entry is restored in memory.
    pub fn remove(&mut self, id: Uuid) -> Result<PlaylistEntry> {
        let removed = self.store.remove(id)?;
        if let Err(err) = self.store.save() {
            self.store.restore(removed);
            return Err(err);
        }
        Ok(removed)
    }
}
