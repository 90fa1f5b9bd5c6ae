//! Input dispatch: a playlist argument is either a flat file or a catalog reference.

use std::path::{Path, PathBuf};

use crate::catalog::{fetch_playlist, PlaylistId};
use crate::error::Result;
use crate::flat_file::read_playlist;
use crate::models::Playlist;
use crate::spotify::{SpotifyClient, SpotifyCredentials};

const CATALOG_PREFIXES: [&str; 3] = ["http://", "https://", "spotify:"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaylistSource {
    File(PathBuf),
    Catalog(String),
}

impl PlaylistSource {
    pub fn classify(input: &str) -> Self {
        if CATALOG_PREFIXES.iter().any(|p| input.starts_with(p)) {
            PlaylistSource::Catalog(input.to_string())
        } else {
            PlaylistSource::File(Path::new(input).to_path_buf())
        }
    }
}

/// Load a playlist from a file path or a catalog link.
///
/// Credentials are only requested for catalog links, and only after the link
/// itself has been validated.
pub fn load_playlist<F>(input: &str, tag: Option<String>, credentials: F) -> Result<Playlist>
where
    F: FnOnce() -> Result<SpotifyCredentials>,
{
    match PlaylistSource::classify(input) {
        PlaylistSource::File(path) => read_playlist(&path, tag),
        PlaylistSource::Catalog(reference) => {
            PlaylistId::parse(&reference)?;
            let client = SpotifyClient::connect(&credentials()?)?;
            fetch_playlist(&client, &reference, tag)
        }
    }
}
