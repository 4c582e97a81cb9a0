//! Application directory paths for recall-notes.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data | `~/Library/Application Support/recall-notes/` | `~/.local/share/recall-notes/` |
//! | Config | `~/Library/Application Support/recall-notes/` | `~/.config/recall-notes/` |
//!
//! Both can be overridden with `RECALL_DATA_DIR` and `RECALL_CONFIG_DIR`.

use std::path::PathBuf;

const APP_DIR: &str = "recall-notes";

/// Persistent data root, holding the playlist file.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("RECALL_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/recall-notes-data"))
}

/// Config directory, holding `config.toml`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("RECALL_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/recall-notes-config"))
}

/// Default config file (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default playlist file (`data_dir()/playlist.json`).
#[must_use]
pub fn playlist_file() -> PathBuf {
    data_dir().join("playlist.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_their_dirs() {
        assert!(config_file().starts_with(config_dir()));
        assert!(config_file().ends_with("config.toml"));
        assert!(playlist_file().starts_with(data_dir()));
        assert!(playlist_file().ends_with("playlist.json"));
    }
}
