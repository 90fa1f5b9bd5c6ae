//! Core data models: songs, playlists and duration parsing.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::similarity::titles_match;

// ============================================================================
// Durations
// ============================================================================

/// Duration as it arrives from a source: whole seconds, or a `MM:SS` clock string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDuration<'a> {
    Seconds(u32),
    Clock(&'a str),
}

impl From<u32> for RawDuration<'_> {
    fn from(secs: u32) -> Self {
        RawDuration::Seconds(secs)
    }
}

impl<'a> From<&'a str> for RawDuration<'a> {
    fn from(clock: &'a str) -> Self {
        RawDuration::Clock(clock)
    }
}

impl<'a> From<&'a String> for RawDuration<'a> {
    fn from(clock: &'a String) -> Self {
        RawDuration::Clock(clock.as_str())
    }
}

/// Normalize a duration to whole seconds.
///
/// Clock strings must contain exactly one colon with an unsigned integer on
/// each side; `"3:45"` is 225. Seconds past 59 are accepted as-is.
pub fn parse_duration<'a>(raw: impl Into<RawDuration<'a>>) -> Result<u32> {
    match raw.into() {
        RawDuration::Seconds(secs) => Ok(secs),
        RawDuration::Clock(clock) => {
            let invalid = || Error::Format(clock.to_string());

            let (minutes, seconds) = clock.split_once(':').ok_or_else(invalid)?;
            if seconds.contains(':') {
                return Err(invalid());
            }
            let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
            let seconds: u32 = seconds.trim().parse().map_err(|_| invalid())?;

            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(invalid)
        }
    }
}

// ============================================================================
// Song
// ============================================================================

/// One track of a playlist.
///
/// `==` compares every field. Fuzzy title matching, the relation used for
/// intersections, is the separately named [`Song::matches`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: u32, // seconds
}

impl Song {
    pub fn create<'a>(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration: impl Into<RawDuration<'a>>,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration: parse_duration(duration)?,
        })
    }

    /// Title-only fuzzy equality: case-insensitive similarity >= 0.80.
    ///
    /// Artist and album are ignored so remaster/live variants collapse.
    /// The relation is not transitive.
    pub fn matches(&self, other: &Song) -> bool {
        titles_match(&self.title, &other.title)
    }
}

/// Left-aligned, width-limited column.
fn column(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width).collect();
    format!("{:<width$}", clipped, width = width)
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {:>5}s",
            column(&self.title, 40),
            column(&self.artist, 20),
            column(&self.album, 25),
            self.duration
        )
    }
}

// ============================================================================
// Playlist
// ============================================================================

/// Ordered songs plus an optional tag used to name output artifacts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Playlist {
    songs: Vec<Song>,
    tag: Option<String>,
}

impl Playlist {
    pub fn new(songs: Vec<Song>, tag: Option<String>) -> Self {
        let tag = tag.filter(|t| !t.is_empty());
        Self { songs, tag }
    }

    pub fn tagged(songs: Vec<Song>, tag: impl Into<String>) -> Self {
        Self::new(songs, Some(tag.into()))
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Prefix an artifact name with the tag: `"{tag}_{name}"`, or `name` when untagged.
    pub fn artifact_name(&self, name: &str) -> String {
        match &self.tag {
            Some(tag) => format!("{}_{}", tag, name),
            None => name.to_string(),
        }
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for song in &self.songs {
            writeln!(f, "{}", song)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str) -> Song {
        Song::create(title, "Artist", "Album", 200u32).unwrap()
    }

    #[test]
    fn test_parse_duration_clock() {
        assert_eq!(parse_duration("3:45").unwrap(), 225);
        assert_eq!(parse_duration("0:07").unwrap(), 7);
        assert_eq!(parse_duration("12:00").unwrap(), 720);
        assert_eq!(parse_duration(" 4 : 05 ").unwrap(), 245);
    }

    #[test]
    fn test_parse_duration_seconds_passthrough() {
        assert_eq!(parse_duration(225u32).unwrap(), 225);
        assert_eq!(parse_duration(0u32).unwrap(), 0);
    }

    #[test]
    fn test_parse_duration_rejects_malformed() {
        for bad in ["abc", "225", "1:2:3", "3:", ":45", "-1:30", "3:4x", ""] {
            let err = parse_duration(bad).unwrap_err();
            assert!(matches!(err, Error::Format(ref s) if s == bad), "{bad}");
        }
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert!(matches!(
            parse_duration("4294967295:00"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_create_normalizes_duration() {
        let a = Song::create("Title", "Artist", "Album", "4:00").unwrap();
        let b = Song::create("Title", "Artist", "Album", 240u32).unwrap();
        assert_eq!(a, b);
        assert!(Song::create("Title", "Artist", "Album", "four").is_err());
    }

    #[test]
    fn test_matches_reflexive() {
        for title in ["Yesterday", "", "Ünïcödé", "a"] {
            let s = song(title);
            assert!(s.matches(&s));
        }
    }

    #[test]
    fn test_matches_ignores_artist_and_album() {
        let a = Song::create("Wonderwall", "Oasis", "Morning Glory", 258u32).unwrap();
        let b = Song::create("wonderwall", "Ryan Adams", "Love Is Hell", 220u32).unwrap();
        assert!(a.matches(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_matches_not_transitive() {
        // a ~ b sits exactly on the threshold, b ~ c is 0.91, a ~ c is 0.72
        let a = song("Paint It Black");
        let b = song("Paint It Black - Mono");
        let c = song("Paint It Black - Mono Mix");
        assert!(a.matches(&b));
        assert!(b.matches(&c));
        assert!(!a.matches(&c));
    }

    #[test]
    fn test_display_truncates_columns() {
        let s = Song::create("T".repeat(50), "A".repeat(30), "B".repeat(30), 61u32).unwrap();
        let line = s.to_string();
        let parts: Vec<&str> = line.split(" | ").collect();
        assert_eq!(parts[0], "T".repeat(40));
        assert_eq!(parts[1], "A".repeat(20));
        assert_eq!(parts[2], "B".repeat(25));
        assert_eq!(parts[3], "   61s");
    }

    #[test]
    fn test_display_pads_short_fields() {
        let s = Song::create("Hey", "Me", "It", 5u32).unwrap();
        assert_eq!(
            s.to_string(),
            format!("{:<40} | {:<20} | {:<25} |     5s", "Hey", "Me", "It")
        );
    }

    #[test]
    fn test_playlist_order_and_tag() {
        let p = Playlist::tagged(vec![song("One"), song("Two")], "mine");
        let titles: Vec<&str> = p.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.artifact_name("duration_box"), "mine_duration_box");

        let untagged = Playlist::new(vec![], Some(String::new()));
        assert_eq!(untagged.tag(), None);
        assert_eq!(untagged.artifact_name("duration_box"), "duration_box");
        assert!(untagged.is_empty());
    }
}
