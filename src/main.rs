use anyhow::{Context, Result};
use clap::Parser;
use playlist_overlap::charts::{Artifact, ChartSink, JsonChartWriter};
use playlist_overlap::intersect::intersect;
use playlist_overlap::progress::{format_duration, init_logging, set_log_only};
use playlist_overlap::source::load_playlist;
use playlist_overlap::spotify::SpotifyCredentials;
use playlist_overlap::stats::{artist_counts, frequency_of_frequencies, DurationSummary, VennCounts};
use playlist_overlap::Playlist;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "playlist-overlap")]
#[command(about = "Find the songs two playlists share, matching titles fuzzily")]
struct Args {
    /// First playlist: a flat file or a Spotify playlist link
    first: String,

    /// Second playlist: a flat file or a Spotify playlist link
    second: String,

    #[arg(long)]
    first_tag: Option<String>,

    #[arg(long)]
    second_tag: Option<String>,

    /// Directory for chart datasets
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    spotify_client_id: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    spotify_client_secret: Option<String>,

    /// Print the shared songs
    #[arg(long)]
    print: bool,

    /// Disable progress bars, log periodic progress lines instead
    #[arg(long)]
    log_only: bool,
}

fn write_playlist_charts(sink: &mut impl ChartSink, playlist: &Playlist) -> Result<()> {
    match DurationSummary::from_playlist(playlist) {
        Some(summary) => {
            sink.render(&Artifact::duration_box(playlist, &summary))?;
        }
        None => log::warn!("{} is empty, skipping duration chart", playlist.artifact_name("playlist")),
    }

    let counts = artist_counts(playlist);
    sink.render(&Artifact::artist_frequency_bar(playlist, &counts))?;
    let freq = frequency_of_frequencies(&counts);
    sink.render(&Artifact::artist_frequency_dist(playlist, &freq))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();
    set_log_only(args.log_only);

    let start = Instant::now();
    let credentials = || {
        SpotifyCredentials::new(
            args.spotify_client_id.clone(),
            args.spotify_client_secret.clone(),
        )
    };

    let first = load_playlist(&args.first, args.first_tag.clone(), credentials)
        .with_context(|| format!("Failed to load playlist {}", args.first))?;
    let second = load_playlist(&args.second, args.second_tag.clone(), credentials)
        .with_context(|| format!("Failed to load playlist {}", args.second))?;
    println!("Loaded {} and {} songs", first.len(), second.len());

    let mut sink = JsonChartWriter::new(&args.out_dir);
    write_playlist_charts(&mut sink, &first).context("Failed to write charts")?;
    write_playlist_charts(&mut sink, &second).context("Failed to write charts")?;

    let shared = intersect(&first, &second);
    if args.print {
        println!("\nShared songs:");
        println!("{:-<80}", "");
        print!("{}", shared);
    }

    let venn = VennCounts::new(&first, &second, &shared);
    sink.render(&Artifact::venn(&venn))
        .context("Failed to write venn chart")?;

    println!("\n{:=<60}", "");
    println!("Intersection complete!");
    println!("  {}: {} songs", venn.first_label, first.len());
    println!("  {}: {} songs", venn.second_label, second.len());
    println!("  Shared: {}", shared.len());
    println!("  Charts: {}", args.out_dir.display());
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    Ok(())
}
