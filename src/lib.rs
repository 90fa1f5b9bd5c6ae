//! Playlist overlap: fuzzy intersection of playlists, chart datasets, and
//! lyric word clouds. Shared by the `playlist-overlap` and `lyric-cloud` binaries.

pub mod catalog;
pub mod charts;
pub mod error;
pub mod flat_file;
pub mod genius;
pub mod intersect;
pub mod lyrics;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod similarity;
pub mod source;
pub mod spotify;
pub mod stats;
pub mod wordcloud;

pub use error::{Error, Result};
pub use models::{Playlist, Song};
