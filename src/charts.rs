//! Rendering boundary.
//!
//! Aggregates are handed to a [`ChartSink`] as named [`Artifact`]s; drawing
//! them is the sink's business. [`JsonChartWriter`] stores each dataset as
//! `<out_dir>/<name>.json` for an external plotting step.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::models::Playlist;
use crate::stats::{ArtistCount, DurationSummary, VennCounts, WordCount};

/// Name of the venn artifact; it belongs to a pair of playlists, not one.
pub const VENN_ARTIFACT: &str = "playlist_intersection_venn";

#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Chart<'a> {
    DurationBox(&'a DurationSummary),
    ArtistFrequencyBar(&'a [ArtistCount]),
    ArtistFrequencyDist(&'a BTreeMap<usize, usize>),
    Venn(&'a VennCounts),
    WordCloud(&'a [WordCount]),
}

#[derive(Debug, Serialize)]
pub struct Artifact<'a> {
    pub name: String,
    pub title: String,
    pub chart: Chart<'a>,
}

fn titled(playlist: &Playlist, title: &str) -> String {
    match playlist.tag() {
        Some(tag) => format!("{} {}", tag, title),
        None => title.to_string(),
    }
}

impl<'a> Artifact<'a> {
    pub fn duration_box(playlist: &Playlist, summary: &'a DurationSummary) -> Self {
        Self {
            name: playlist.artifact_name("duration_box"),
            title: titled(playlist, "Song Duration Distribution"),
            chart: Chart::DurationBox(summary),
        }
    }

    pub fn artist_frequency_bar(playlist: &Playlist, counts: &'a [ArtistCount]) -> Self {
        Self {
            name: playlist.artifact_name("artist_frequency_bar"),
            title: titled(playlist, "Songs per artist (ascending)"),
            chart: Chart::ArtistFrequencyBar(counts),
        }
    }

    pub fn artist_frequency_dist(playlist: &Playlist, freq: &'a BTreeMap<usize, usize>) -> Self {
        Self {
            name: playlist.artifact_name("artist_frequency_dist"),
            title: titled(playlist, "Distribution of artist frequencies"),
            chart: Chart::ArtistFrequencyDist(freq),
        }
    }

    pub fn venn(venn: &'a VennCounts) -> Self {
        Self {
            name: VENN_ARTIFACT.to_string(),
            title: "Playlist Intersection".to_string(),
            chart: Chart::Venn(venn),
        }
    }

    pub fn word_cloud(playlist: &Playlist, words: &'a [WordCount]) -> Self {
        Self {
            name: playlist.artifact_name("wordCloud"),
            title: titled(playlist, "Lyrics"),
            chart: Chart::WordCloud(words),
        }
    }
}

/// Consumer of chart datasets. Returns where the artifact ended up.
pub trait ChartSink {
    fn render(&mut self, artifact: &Artifact<'_>) -> Result<PathBuf>;
}

/// Writes artifacts as pretty-printed JSON files.
#[derive(Clone, Debug)]
pub struct JsonChartWriter {
    out_dir: PathBuf,
}

impl JsonChartWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl ChartSink for JsonChartWriter {
    fn render(&mut self, artifact: &Artifact<'_>) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{}.json", artifact.name));
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, artifact)?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }
}
