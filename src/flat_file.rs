//! Flat-file playlist exports.
//!
//! The format repeats five-line records with no header:
//!
//! ```text
//! 1
//! Hotel California
//! Eagles
//! Hotel California
//! 6:30
//! ```
//!
//! Lines are track number, title, artist, album and duration (`MM:SS` or
//! whole seconds). The file is consumed five raw lines at a time and blank
//! lines are discarded inside each chunk, so a stray blank line shortens
//! the record it lands in. That includes blank lines after the last record.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Playlist, RawDuration, Song};

/// Lines per record.
pub const RECORD_LINES: usize = 5;

/// Read and parse a flat-file export.
pub fn read_playlist(path: &Path, tag: Option<String>) -> Result<Playlist> {
    let text = fs::read_to_string(path)?;
    let playlist = parse_playlist(&text, tag)?;
    log::info!("Read {} songs from {}", playlist.len(), path.display());
    Ok(playlist)
}

/// Parse flat-file text into a playlist. All-or-nothing: the first bad
/// record fails the whole parse.
pub fn parse_playlist(text: &str, tag: Option<String>) -> Result<Playlist> {
    let lines: Vec<&str> = text.lines().collect();
    let chunk_count = lines.len().div_ceil(RECORD_LINES);
    let mut songs = Vec::with_capacity(chunk_count);

    for (i, chunk) in lines.chunks(RECORD_LINES).enumerate() {
        let fields: Vec<&str> = chunk
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        let [_track_no, title, artist, album, duration] = fields[..] else {
            return Err(Error::Structural {
                index: i + 1,
                lines: fields.iter().map(|s| s.to_string()).collect(),
            });
        };

        songs.push(Song::create(title, artist, album, record_duration(duration))?);
    }

    Ok(Playlist::new(songs, tag))
}

/// Durations in exports are either plain seconds or a clock string.
fn record_duration(field: &str) -> RawDuration<'_> {
    if !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(secs) = field.parse() {
            return RawDuration::Seconds(secs);
        }
    }
    RawDuration::Clock(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_RECORDS: &str = "\
1
Hotel California
Eagles
Hotel California
6:30
2
Africa
Toto
Toto IV
295
";

    #[test]
    fn test_two_records_in_order() {
        let playlist = parse_playlist(TWO_RECORDS, Some("ryan".into())).unwrap();
        assert_eq!(playlist.len(), 2);
        assert_eq!(
            playlist.songs()[0],
            Song::create("Hotel California", "Eagles", "Hotel California", 390u32).unwrap()
        );
        assert_eq!(playlist.songs()[1].title, "Africa");
        assert_eq!(playlist.songs()[1].duration, 295);
        assert_eq!(playlist.tag(), Some("ryan"));
    }

    #[test]
    fn test_short_last_chunk_is_structural_error() {
        let text = format!("{}3\nCreep\nRadiohead\n", TWO_RECORDS);
        match parse_playlist(&text, None) {
            Err(Error::Structural { index, lines }) => {
                assert_eq!(index, 3);
                assert_eq!(lines, vec!["3", "Creep", "Radiohead"]);
            }
            other => panic!("expected structural error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_line_inside_chunk_shortens_record() {
        let text = "1\nCreep\n\nRadiohead\nPablo Honey\n3:58\n";
        assert!(matches!(
            parse_playlist(text, None),
            Err(Error::Structural { index: 1, .. })
        ));
    }

    #[test]
    fn test_whitespace_trimmed_and_crlf() {
        let text = "1\r\n  Creep  \r\nRadiohead\r\nPablo Honey\r\n3:58\r\n";
        let playlist = parse_playlist(text, None).unwrap();
        assert_eq!(playlist.songs()[0].title, "Creep");
        assert_eq!(playlist.songs()[0].duration, 238);
    }

    #[test]
    fn test_empty_input_and_trailing_blanks() {
        assert!(parse_playlist("", None).unwrap().is_empty());

        let text = "1\nCreep\nRadiohead\nPablo Honey\n3:58\n\n";
        match parse_playlist(text, None) {
            Err(Error::Structural { index, lines }) => {
                assert_eq!(index, 2);
                assert!(lines.is_empty());
            }
            other => panic!("expected structural error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_duration_is_format_error() {
        let text = "1\nCreep\nRadiohead\nPablo Honey\nthree minutes\n";
        assert!(matches!(parse_playlist(text, None), Err(Error::Format(_))));
    }

    #[test]
    fn test_read_playlist_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_RECORDS.as_bytes()).unwrap();

        let playlist = read_playlist(file.path(), None).unwrap();
        assert_eq!(playlist.len(), 2);
        assert!(matches!(
            read_playlist(Path::new("/nonexistent/playlist.txt"), None),
            Err(Error::Io(_))
        ));
    }
}
