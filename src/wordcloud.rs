//! Lyric word corpus for word-cloud rendering.

use crate::lyrics::{LyricFetcher, LyricsProvider, Throttle};
use crate::models::Playlist;
use crate::normalize::{filter_tokens, StopWords};
use crate::progress::{create_progress_bar, log_progress};

/// Filtered lyric tokens of every song, in playlist order then lyric order.
///
/// Songs are fetched one at a time; each cache miss blocks for the
/// fetcher's provider delay before the next song starts.
pub fn build_corpus<P, T>(
    playlist: &Playlist,
    fetcher: &mut LyricFetcher<P, T>,
    stop_words: &StopWords,
) -> Vec<String>
where
    P: LyricsProvider,
    T: Throttle,
{
    let total = playlist.len() as u64;
    let pb = create_progress_bar(total, "Fetching lyrics");
    let mut corpus = Vec::new();
    let mut missing = 0usize;

    for (i, song) in playlist.iter().enumerate() {
        let lyrics = fetcher.fetch(song);
        if lyrics.is_empty() {
            missing += 1;
        }
        corpus.extend(filter_tokens(&lyrics, stop_words));

        pb.inc(1);
        log_progress("lyrics", i as u64 + 1, total, 10);
    }

    pb.finish_with_message(format!(
        "Fetched lyrics for {}/{} songs",
        playlist.len() - missing,
        playlist.len()
    ));
    log::info!(
        "Corpus of {} words from {} songs ({} without lyrics)",
        corpus.len(),
        playlist.len(),
        missing
    );
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lyrics::tests::{CountingThrottle, FakeProvider};
    use crate::lyrics::LyricCacheConfig;
    use crate::models::Song;

    fn song(title: &str) -> Song {
        Song::create(title, "Artist", "Album", 200u32).unwrap()
    }

    #[test]
    fn test_corpus_in_playlist_then_lyric_order() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FakeProvider::default()
            .with("First", Ok(Some("The Sun Is Up".into())))
            .with("Broken", Err(Error::Config("boom".into())))
            .with("Second", Ok(Some("[Chorus]\nMoon, is DOWN; moon!".into())));
        let config = LyricCacheConfig {
            dir: dir.path().to_path_buf(),
            ..LyricCacheConfig::default()
        };
        let mut fetcher = LyricFetcher::with_throttle(&config, provider, CountingThrottle::default());
        let playlist = Playlist::new(vec![song("First"), song("Broken"), song("Second")], None);
        let stop_words: StopWords = ["the", "is", "chorus"].into_iter().collect();

        let corpus = build_corpus(&playlist, &mut fetcher, &stop_words);
        assert_eq!(corpus, vec!["sun", "up", "moon", "down", "moon"]);
        assert_eq!(fetcher.throttle().pauses.len(), 3);
    }

    #[test]
    fn test_corpus_reuses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config = LyricCacheConfig {
            dir: dir.path().to_path_buf(),
            ..LyricCacheConfig::default()
        };
        let provider = FakeProvider::default().with("Only", Ok(Some("stars shine".into())));
        let mut fetcher = LyricFetcher::with_throttle(&config, provider, CountingThrottle::default());
        let playlist = Playlist::new(vec![song("Only"), song("Only")], None);

        let corpus = build_corpus(&playlist, &mut fetcher, &StopWords::default());
        assert_eq!(corpus, vec!["stars", "shine", "stars", "shine"]);
        assert_eq!(fetcher.provider().calls, 1);
    }
}
