//! recall-notes: remember songs by searching a music catalog.
//!
//! Type a half-remembered title, pick from a short ranked list, and the
//! song is saved to a per-user playlist on disk.
//!
//! # Architecture
//!
//! - **Search**: the `recall-search` crate queries Spotify (or an offline
//!   catalog), drops derivative versions and ranks the rest
//! - **Playlist**: [`playlist::PlaylistStore`] persists entries as JSON with
//!   per-user duplicate checks
//! - **App**: [`app::RecallApp`] joins the two for the `recall` binary

pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod playlist;

pub use app::{AppCatalog, RecallApp};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use playlist::{NewEntry, PlaylistEntry, PlaylistStore};
