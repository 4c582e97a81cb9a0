//! Application configuration.
//!
//! Loaded from a TOML file with every section optional:
//!
//! ```toml
//! default_user = "me"
//!
//! [search]
//! max_results = 10
//! market = "JP"
//!
//! [spotify]
//! client_id = "..."
//! client_secret = "..."
//!
//! [storage]
//! playlist_path = "/home/me/.local/share/recall-notes/playlist.json"
//! ```
//!
//! Spotify credentials from `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`
//! take precedence over the file.

use std::path::{Path, PathBuf};

use recall_search::{ClientCredentials, SearchConfig};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable holding the Spotify client id.
pub const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
/// Environment variable holding the Spotify client secret.
pub const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// User id that playlist commands act on when none is given.
    pub default_user: String,
    pub search: SearchConfig,
    pub spotify: SpotifyConfig,
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_user: "me".to_owned(),
            search: SearchConfig::default(),
            spotify: SpotifyConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Spotify application credentials.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl SpotifyConfig {
    /// Both credentials, when present and non-blank.
    pub fn credentials(&self) -> Option<ClientCredentials> {
        let id = self.client_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let secret = self
            .client_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some(ClientCredentials {
            client_id: id.to_owned(),
            client_secret: secret.to_owned(),
        })
    }
}

/// Where the playlist is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub playlist_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            playlist_path: crate::app_dirs::playlist_file(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load `path` if it exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::app_dirs::config_file()
    }

    /// Replace file credentials with any set in the environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_credential_overrides(
            std::env::var(CLIENT_ID_ENV).ok(),
            std::env::var(CLIENT_SECRET_ENV).ok(),
        );
    }

    fn apply_credential_overrides(&mut self, client_id: Option<String>, client_secret: Option<String>) {
        if let Some(id) = client_id.filter(|s| !s.trim().is_empty()) {
            self.spotify.client_id = Some(id);
        }
        if let Some(secret) = client_secret.filter(|s| !s.trim().is_empty()) {
            self.spotify.client_secret = Some(secret);
        }
    }

    /// Validate the search section.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.default_user.trim().is_empty() {
            return Err(AppError::Config("default_user must not be empty".into()));
        }
        self.search
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
