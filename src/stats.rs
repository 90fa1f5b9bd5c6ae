//! Chart-ready aggregates over playlists.
//!
//! Nothing here draws; each type is a dataset a renderer can plot directly.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::models::Playlist;

// ============================================================================
// Duration Distribution
// ============================================================================

/// Box-plot summary of song durations (seconds).
/// Quartiles use linear interpolation; whiskers reach the furthest points
/// within 1.5 IQR of the box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DurationSummary {
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: u32,
    pub upper_whisker: u32,
    pub outliers: Vec<u32>,
    /// Every duration in playlist order, for the scatter overlay.
    pub durations: Vec<u32>,
}

/// Linear-interpolated percentile of sorted, non-empty data. `p` in 0..=1.
fn percentile(sorted: &[u32], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (lo_v, hi_v) = (sorted[lo] as f64, sorted[hi] as f64);
    lo_v + (hi_v - lo_v) * (pos - lo as f64)
}

impl DurationSummary {
    /// `None` for an empty playlist.
    pub fn from_playlist(playlist: &Playlist) -> Option<Self> {
        let durations: Vec<u32> = playlist.iter().map(|s| s.duration).collect();
        let mut sorted = durations.clone();
        sorted.sort_unstable();
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let reach = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let inside = || sorted.iter().copied().filter(|&d| {
            let d = d as f64;
            d >= low_fence && d <= high_fence
        });
        let lower_whisker = inside().min().unwrap_or(min);
        let upper_whisker = inside().max().unwrap_or(max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&d| (d as f64) < low_fence || (d as f64) > high_fence)
            .collect();

        let total: u64 = durations.iter().map(|&d| d as u64).sum();

        Some(Self {
            count: durations.len(),
            min,
            max,
            mean: total as f64 / durations.len() as f64,
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
            durations,
        })
    }
}

// ============================================================================
// Artist Frequency
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArtistCount {
    pub artist: String,
    pub songs: usize,
}

/// Songs per artist, ascending by count; ties keep first-seen order.
/// The artist string is used verbatim, so "Queen, David Bowie" is its own artist.
pub fn artist_counts(playlist: &Playlist) -> Vec<ArtistCount> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<ArtistCount> = Vec::new();

    for song in playlist {
        match index.get(song.artist.as_str()) {
            Some(&i) => counts[i].songs += 1,
            None => {
                index.insert(&song.artist, counts.len());
                counts.push(ArtistCount {
                    artist: song.artist.clone(),
                    songs: 1,
                });
            }
        }
    }

    counts.sort_by_key(|c| c.songs);
    counts
}

/// How many artists have exactly k songs, keyed by k ascending.
pub fn frequency_of_frequencies(counts: &[ArtistCount]) -> BTreeMap<usize, usize> {
    let mut freq = BTreeMap::new();
    for c in counts {
        *freq.entry(c.songs).or_insert(0) += 1;
    }
    freq
}

// ============================================================================
// Venn
// ============================================================================

/// Region sizes for a two-set venn diagram.
///
/// Intersections are multisets, so `both` can exceed an input's length; the
/// exclusive regions saturate at zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VennCounts {
    pub first_label: String,
    pub second_label: String,
    pub only_first: usize,
    pub only_second: usize,
    pub both: usize,
}

impl VennCounts {
    pub fn new(first: &Playlist, second: &Playlist, intersection: &Playlist) -> Self {
        let both = intersection.len();
        Self {
            first_label: first.tag().unwrap_or("first").to_string(),
            second_label: second.tag().unwrap_or("second").to_string(),
            only_first: first.len().saturating_sub(both),
            only_second: second.len().saturating_sub(both),
            both,
        }
    }
}

// ============================================================================
// Word Frequency
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Corpus word counts, most frequent first; ties keep first-seen order.
/// `limit` caps the number of words returned.
pub fn word_frequencies(tokens: &[String], limit: Option<usize>) -> Vec<WordCount> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<WordCount> = Vec::new();

    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(token, counts.len());
                counts.push(WordCount {
                    word: token.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        counts.truncate(limit);
    }
    counts
}

// ============================================================================
// TESTS
// ============================================================================
