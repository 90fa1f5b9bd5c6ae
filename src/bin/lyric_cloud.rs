//! Build a lyric word cloud dataset for one playlist.
//!
//! Usage: lyric-cloud <playlist.txt | playlist link> [--tag NAME] [--top N]
//!
//! Lyrics are cached on disk, so a second run over the same playlist makes no
//! provider calls. Uncached songs cost one provider delay each.

use anyhow::{Context, Result};
use clap::Parser;
use playlist_overlap::charts::{Artifact, ChartSink, JsonChartWriter};
use playlist_overlap::genius::GeniusClient;
use playlist_overlap::lyrics::{
    LyricCacheConfig, LyricFetcher, DEFAULT_CACHE_DIR, DEFAULT_PROVIDER_DELAY,
};
use playlist_overlap::normalize::StopWords;
use playlist_overlap::progress::{format_duration, init_logging, set_log_only};
use playlist_overlap::source::load_playlist;
use playlist_overlap::spotify::SpotifyCredentials;
use playlist_overlap::stats::word_frequencies;
use playlist_overlap::wordcloud::build_corpus;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "lyric-cloud")]
#[command(about = "Count lyric words across a playlist for a word cloud")]
struct Args {
    /// Playlist: a flat file or a Spotify playlist link
    source: String,

    #[arg(long)]
    tag: Option<String>,

    /// Directory for the word cloud dataset
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Pause after each lyrics provider call
    #[arg(long, default_value_t = DEFAULT_PROVIDER_DELAY.as_secs())]
    delay_secs: u64,

    /// Number of words kept in the dataset
    #[arg(long, default_value = "200")]
    top: usize,

    #[arg(long, env = "GENIUS_ACCESS_TOKEN", hide_env_values = true)]
    genius_token: String,

    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    spotify_client_id: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    spotify_client_secret: Option<String>,

    /// Disable progress bars, log periodic progress lines instead
    #[arg(long)]
    log_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    set_log_only(args.log_only);

    let start = Instant::now();
    let playlist = load_playlist(&args.source, args.tag.clone(), || {
        SpotifyCredentials::new(
            args.spotify_client_id.clone(),
            args.spotify_client_secret.clone(),
        )
    })
    .with_context(|| format!("Failed to load playlist {}", args.source))?;

    let genius = GeniusClient::new(args.genius_token.clone())
        .context("Failed to create lyrics client")?;
    let config = LyricCacheConfig {
        dir: args.cache_dir.clone(),
        delay: Duration::from_secs(args.delay_secs),
    };
    let mut fetcher = LyricFetcher::new(&config, genius);

    println!(
        "Fetching lyrics for {} songs (cache: {:?})",
        playlist.len(),
        config.dir
    );
    let corpus = build_corpus(&playlist, &mut fetcher, &StopWords::default());
    let words = word_frequencies(&corpus, Some(args.top));

    let mut sink = JsonChartWriter::new(&args.out_dir);
    let path = sink
        .render(&Artifact::word_cloud(&playlist, &words))
        .context("Failed to write word cloud")?;

    println!("\n{:=<60}", "");
    println!("Word cloud complete!");
    println!("  Songs: {}", playlist.len());
    println!("  Words: {} ({} distinct kept)", corpus.len(), words.len());
    if let Some(top) = words.first() {
        println!("  Most frequent: {} ({})", top.word, top.count);
    }
    println!("  Output: {}", path.display());
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    Ok(())
}
