//! `recall`: search a music catalog and keep a playlist of songs to remember.
//!
//! Results go to stdout; tracing output goes to stderr.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recall_notes::{AppCatalog, AppConfig, AppError, PlaylistEntry, PlaylistStore, RecallApp};
use recall_search::{CatalogSource, RawHit, TrackSearch};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Search for songs and save the ones you want to remember.
#[derive(Parser)]
#[command(name = "recall", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the built-in offline catalog instead of Spotify.
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ranked track suggestions for a query.
    Search {
        query: String,
        /// Maximum suggestions to show.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Artists matching a query.
    Artists { query: String },

    /// An artist's most popular tracks.
    ArtistTracks {
        artist_id: String,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// An album's tracks.
    Album { album_id: String },

    /// Search and save one suggestion to the playlist.
    Add {
        query: String,
        /// Which suggestion to save, counting from 1.
        #[arg(short, long, default_value_t = 1)]
        pick: usize,
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show saved songs.
    List {
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Delete a saved song by entry id.
    Remove { entry_id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recall_notes=info,recall_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load_or_default(&AppConfig::default_config_path())?,
    };
    config.apply_env_overrides();
    config.validate()?;

    let catalog = AppCatalog::from_config(&config, cli.offline)?;
    tracing::debug!(catalog = %catalog.kind(), "catalog selected");
    let search = TrackSearch::new(catalog, config.search.clone())?;
    let store = PlaylistStore::open(config.storage.playlist_path.clone())?;
    let mut app = RecallApp::new(search, store);

    run(&mut app, cli.command, &config).await
}

async fn run<C: CatalogSource>(
    app: &mut RecallApp<C>,
    command: Command,
    config: &AppConfig,
) -> anyhow::Result<()> {
    match command {
        Command::Search { query, limit } => {
            let limit = limit.unwrap_or(config.search.max_results);
            let suggestions = app
                .search()
                .suggest_with_limit(&query, limit)
                .await
                .map_err(|e| failure("search", e.into()))?;
            if suggestions.is_empty() {
                println!("No matches for \"{query}\".");
            }
            for (i, suggestion) in suggestions.iter().enumerate() {
                println!("{:>2}. {}", i + 1, describe_hit(&suggestion.track));
            }
        }

        Command::Artists { query } => {
            let artists = app
                .search()
                .search_artists(&query)
                .await
                .map_err(|e| failure("artist search", e.into()))?;
            if artists.is_empty() {
                println!("No artists match \"{query}\".");
            }
            for artist in &artists {
                println!(
                    "{}  [{}]  {} followers",
                    artist.name, artist.id, artist.followers
                );
            }
        }

        Command::ArtistTracks {
            artist_id,
            offset,
            limit,
        } => {
            let page = app
                .search()
                .artist_tracks(&artist_id, offset, limit)
                .await
                .map_err(|e| failure("artist tracks", e.into()))?;
            for (i, track) in page.tracks.iter().enumerate() {
                println!("{:>2}. {}", offset + i + 1, describe_hit(track));
            }
            println!("({} of {} tracks)", page.tracks.len(), page.total);
            if page.has_more {
                println!("More: --offset {}", offset + page.tracks.len());
            }
        }

        Command::Album { album_id } => {
            let album = app
                .search()
                .album_tracks(&album_id)
                .await
                .map_err(|e| failure("album lookup", e.into()))?;
            println!(
                "{} / {}",
                album.album.title,
                album.album.artist_names.join(", ")
            );
            if let Some(date) = &album.album.release_date {
                println!("Released {date}");
            }
            for (i, track) in album.tracks.iter().enumerate() {
                println!("{:>2}. {}", i + 1, track.title);
            }
        }

        Command::Add { query, pick, user } => {
            let user = user.unwrap_or_else(|| config.default_user.clone());
            match app.add_from_query(&user, &query, pick).await {
                Ok(entry) => println!("Saved {}", describe_entry(&entry)),
                Err(AppError::DuplicateEntry(song)) => {
                    println!("Already in your playlist: {song}");
                }
                Err(e) => return Err(failure("add", e)),
            }
        }

        Command::List { user } => {
            let user = user.unwrap_or_else(|| config.default_user.clone());
            let entries = app.store().entries_for_user(&user);
            if entries.is_empty() {
                println!("Playlist for {user} is empty.");
            }
            for entry in entries {
                println!("{}", describe_entry(entry));
            }
        }

        Command::Remove { entry_id } => {
            let removed = app.remove(entry_id).map_err(|e| failure("remove", e))?;
            println!("Removed {}", describe_entry(&removed));
        }
    }
    Ok(())
}

/// Log the full error and hand back a short message for the terminal.
fn failure(action: &str, err: AppError) -> anyhow::Error {
    tracing::error!(error = %err, "{action} failed");
    match err {
        AppError::NotFound(what) => anyhow::anyhow!("{action} failed: {what} not found"),
        _ => anyhow::anyhow!("{action} failed"),
    }
}

fn describe_hit(hit: &RawHit) -> String {
    let mut line = format!("{} / {}", hit.title, hit.artist_display());
    if !hit.album_title.is_empty() {
        line.push_str(&format!(" ({})", hit.album_title));
    }
    line.push_str(&format!("  [{}]", hit.id));
    line
}

fn describe_entry(entry: &PlaylistEntry) -> String {
    format!(
        "{} / {}  added {}  [{}]",
        entry.title,
        entry.artist,
        entry.added_at.format("%Y-%m-%d"),
        entry.id
    )
}
