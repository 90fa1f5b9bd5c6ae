//! Streaming-catalog playlists.
//!
//! The adapter only needs one capability from the catalog: fetch a page of
//! playlist items at an offset. [`CatalogApi`] is that capability; the HTTP
//! implementation lives in [`crate::spotify`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Playlist, RawDuration, Song};
use crate::progress::{create_spinner, log_progress};

/// Items requested per page.
pub const PAGE_SIZE: usize = 100;

// ============================================================================
// Playlist References
// ============================================================================

/// `https://open.spotify.com/playlist/<id>` with optional locale segment and query.
static PLAYLIST_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://open\.spotify\.com/(?:intl-[A-Za-z-]+/)?playlist/([A-Za-z0-9]+)/?(?:[?#].*)?$")
        .unwrap()
});

/// `spotify:playlist:<id>`
static PLAYLIST_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^spotify:playlist:([A-Za-z0-9]+)$").unwrap());

/// Validated catalog playlist identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Accept a playlist link or URI; anything else (tracks, albums, other
    /// hosts) is a validation error. No network access happens here.
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        PLAYLIST_URL
            .captures(reference)
            .or_else(|| PLAYLIST_URI.captures(reference))
            .and_then(|caps| caps.get(1))
            .map(|id| PlaylistId(id.as_str().to_string()))
            .ok_or_else(|| Error::Validation(reference.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Page Payloads
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogItem {
    /// Null for tracks removed from the catalog and for filtered-out episodes.
    pub track: Option<CatalogTrack>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogTrack {
    pub name: String,
    pub artists: Vec<CatalogArtist>,
    pub album: CatalogAlbum,
    pub duration_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogArtist {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogAlbum {
    pub name: String,
}

impl CatalogTrack {
    /// Map to a song: all credited artists comma-joined in credited order,
    /// duration truncated to whole seconds.
    pub fn to_song(&self) -> Result<Song> {
        let artist = self
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let secs = u32::try_from(self.duration_ms / 1000)
            .map_err(|_| Error::Format(format!("{}ms", self.duration_ms)))?;
        Song::create(&self.name, artist, &self.album.name, RawDuration::Seconds(secs))
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Page-at-a-time access to a catalog's playlist items.
pub trait CatalogApi {
    fn playlist_page(&self, playlist: &PlaylistId, offset: usize, limit: usize)
        -> Result<CatalogPage>;
}

/// Fetch every track of `reference` and build a playlist.
///
/// The reference is validated before any request. Pages are requested until
/// the accumulated offset reaches the reported total; any provider error
/// discards what was gathered so far.
pub fn fetch_playlist<C: CatalogApi + ?Sized>(
    catalog: &C,
    reference: &str,
    tag: Option<String>,
) -> Result<Playlist> {
    let id = PlaylistId::parse(reference)?;
    let mut songs = Vec::new();
    let mut offset = 0;
    let spinner = create_spinner("Fetching playlist");

    loop {
        let page = catalog.playlist_page(&id, offset, PAGE_SIZE)?;
        log::debug!(
            "Playlist {}: {} items at offset {} of {}",
            id.as_str(),
            page.items.len(),
            offset,
            page.total
        );

        for item in &page.items {
            match &item.track {
                Some(track) => songs.push(track.to_song()?),
                None => log::warn!("Skipping unavailable item at offset {}", offset),
            }
        }

        offset += page.items.len();
        spinner.set_message(format!("Fetching playlist {}/{}", offset, page.total));
        log_progress("catalog", offset as u64, page.total as u64, PAGE_SIZE as u64);
        if offset >= page.total {
            break;
        }
        if page.items.is_empty() {
            return Err(Error::provider(
                "catalog",
                format!("empty page at offset {} of {}", offset, page.total),
            ));
        }
    }

    spinner.finish_and_clear();
    log::info!("Fetched {} songs from playlist {}", songs.len(), id.as_str());
    Ok(Playlist::new(songs, tag))
}

// ============================================================================
// TESTS
// ============================================================================
