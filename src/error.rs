//! Error types for recall-notes.

use recall_search::SearchError;

/// Top-level error type for the playlist application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Track search or catalog error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// The song is already in the user's playlist.
    #[error("already in playlist: {0}")]
    DuplicateEntry(String),

    /// No entry, suggestion or catalog item matched.
    #[error("not found: {0}")]
    NotFound(String),

    /// Playlist file could not be read, parsed or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
