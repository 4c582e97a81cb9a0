//! Playlist persistence.
//!
//! A [`PlaylistStore`] holds every user's saved songs in one JSON file. The
//! whole file is loaded on [`PlaylistStore::open`] and rewritten atomically
//! (temp file, fsync, rename) on [`PlaylistStore::save`].
//!
//! Duplicates are checked per user: by catalog id when the new entry has
//! one, otherwise by exact title and artist.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use recall_search::Suggestion;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

const FILE_VERSION: u32 = 1;

/// A saved song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Fields supplied when adding a song; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub user_id: String,
    pub title: String,
    pub artist: String,
    pub catalog_id: Option<String>,
    pub album_art_url: Option<String>,
    pub album_title: Option<String>,
    pub album_id: Option<String>,
    pub artist_id: Option<String>,
}

impl NewEntry {
    /// A hand-typed song with no catalog metadata.
    pub fn manual(
        user_id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            artist: artist.into(),
            catalog_id: None,
            album_art_url: None,
            album_title: None,
            album_id: None,
            artist_id: None,
        }
    }

    /// Convert a chosen search suggestion. Empty album titles become `None`.
    pub fn from_suggestion(user_id: impl Into<String>, suggestion: &Suggestion) -> Self {
        let track = &suggestion.track;
        Self {
            user_id: user_id.into(),
            title: track.title.clone(),
            artist: track.artist_display(),
            catalog_id: Some(track.id.clone()),
            album_art_url: track.album_art_url.clone(),
            album_title: Some(track.album_title.clone()).filter(|t| !t.is_empty()),
            album_id: track.album_id.clone(),
            artist_id: track.primary_artist_id.clone(),
        }
    }

    fn describe(&self) -> String {
        format!("{} / {}", self.title, self.artist)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    entries: Vec<PlaylistEntry>,
}

/// File-backed playlist of every user's entries, in insertion order.
#[derive(Debug)]
pub struct PlaylistStore {
    path: PathBuf,
    entries: Vec<PlaylistEntry>,
}

impl PlaylistStore {
    /// Load the store at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the file exists but cannot be read
    /// or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "playlist file absent, starting empty");
            return Ok(Self {
                path,
                entries: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            AppError::Storage(format!(
                "failed to read playlist file {}: {e}",
                path.display()
            ))
        })?;
        let file: PlaylistFile = serde_json::from_str(&content).map_err(|e| {
            AppError::Storage(format!(
                "failed to parse playlist file {}: {e}",
                path.display()
            ))
        })?;
        tracing::debug!(entries = file.entries.len(), "playlist loaded");

        Ok(Self {
            path,
            entries: file.entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry for `new.user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateEntry`] if the user already saved the song.
    pub fn add(&mut self, new: NewEntry) -> Result<&PlaylistEntry> {
        let duplicate = match new.catalog_id.as_deref() {
            Some(catalog_id) => self.is_duplicate_by_catalog_id(&new.user_id, catalog_id),
            None => self.is_duplicate_by_title_artist(&new.user_id, &new.title, &new.artist),
        };
        if duplicate {
            return Err(AppError::DuplicateEntry(new.describe()));
        }

        let entry = PlaylistEntry {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            artist: new.artist,
            catalog_id: new.catalog_id,
            album_art_url: new.album_art_url,
            album_title: new.album_title,
            album_id: new.album_id,
            artist_id: new.artist_id,
            added_at: Utc::now(),
        };
        tracing::info!(entry_id = %entry.id, user = %entry.user_id, "playlist entry added");
        self.entries.push(entry);

        let last = self.entries.len() - 1;
        Ok(&self.entries[last])
    }

    /// Every entry saved by `user_id`, oldest first.
    pub fn entries_for_user(&self, user_id: &str) -> Vec<&PlaylistEntry> {
        self.user_entries(user_id).collect()
    }

    /// `user_id`'s entries credited to catalog artist `artist_id`.
    pub fn entries_by_artist_id(&self, user_id: &str, artist_id: &str) -> Vec<&PlaylistEntry> {
        self.user_entries(user_id)
            .filter(|e| e.artist_id.as_deref() == Some(artist_id))
            .collect()
    }

    /// `user_id`'s entries from catalog album `album_id`.
    pub fn entries_by_album_id(&self, user_id: &str, album_id: &str) -> Vec<&PlaylistEntry> {
        self.user_entries(user_id)
            .filter(|e| e.album_id.as_deref() == Some(album_id))
            .collect()
    }

    pub fn is_duplicate_by_catalog_id(&self, user_id: &str, catalog_id: &str) -> bool {
        self.user_entries(user_id)
            .any(|e| e.catalog_id.as_deref() == Some(catalog_id))
    }

    /// Exact, case-sensitive comparison of both fields.
    pub fn is_duplicate_by_title_artist(&self, user_id: &str, title: &str, artist: &str) -> bool {
        self.user_entries(user_id)
            .any(|e| e.title == title && e.artist == artist)
    }

    /// Remove the entry with `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has that id.
    pub fn remove(&mut self, id: Uuid) -> Result<PlaylistEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("playlist entry {id}")))?;
        let removed = self.entries.remove(index);
        tracing::info!(entry_id = %removed.id, "playlist entry removed");
        Ok(removed)
    }

    /// Put back an entry returned by [`PlaylistStore::remove`], at its
    /// original position by `added_at`.
    pub fn restore(&mut self, entry: PlaylistEntry) {
        let index = self
            .entries
            .partition_point(|e| e.added_at <= entry.added_at);
        self.entries.insert(index, entry);
    }

    /// Write the store to its file.
    ///
    /// Writes a temp file beside the target, fsyncs it and renames it over
    /// the target, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if any step fails.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!(
                    "failed to create playlist directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let file = PlaylistFile {
            version: FILE_VERSION,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| AppError::Storage(format!("failed to serialize playlist: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes()).map_err(|e| {
            AppError::Storage(format!(
                "failed to write temp file {}: {e}",
                tmp_path.display()
            ))
        })?;

        if let Ok(handle) = std::fs::File::open(&tmp_path) {
            let _ = handle.sync_all();
        }

        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            AppError::Storage(format!(
                "failed to rename temp file to {}: {e}",
                self.path.display()
            ))
        })?;
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "playlist saved");
        Ok(())
    }

    fn user_entries<'s>(&'s self, user_id: &str) -> impl Iterator<Item = &'s PlaylistEntry> {
        self.entries.iter().filter(move |e| e.user_id == user_id)
    }
}
