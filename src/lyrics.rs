//! Lyric lookup with an on-disk cache and a fixed provider delay.
//!
//! Per song:
//! - cache file present: return its text (`""` if unreadable), no provider call, no delay
//! - cache miss: ask the provider, then wait `delay` whatever the outcome
//! - non-empty text: write the cache file and return the text
//! - error, no match or empty text: log it, leave the cache alone, return `""`
//!
//! `""` therefore means "no lyrics available", never "not fetched yet".

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::models::Song;
use crate::normalize::slugify;

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "lyrics_cache";

/// Default pause after each provider call.
pub const DEFAULT_PROVIDER_DELAY: Duration = Duration::from_secs(15);

// ============================================================================
// Configuration
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LyricCacheConfig {
    pub dir: PathBuf,
    pub delay: Duration,
}

impl Default for LyricCacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
            delay: DEFAULT_PROVIDER_DELAY,
        }
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Song-text search. `Ok(None)` means the provider has no match.
pub trait LyricsProvider {
    fn search(&mut self, title: &str, artist: &str) -> Result<Option<String>>;
}

/// Blocking pause between provider calls.
pub trait Throttle {
    fn pause(&mut self, delay: Duration);
}

/// Sleeps the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

impl Throttle for ThreadSleep {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            log::debug!("Waiting {:?} before the next lyrics request", delay);
            std::thread::sleep(delay);
        }
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Flat directory of `{artist-slug}-{title-slug}.txt` files.
/// File existence is the only hit signal; entries never expire.
#[derive(Clone, Debug)]
pub struct LyricCache {
    dir: PathBuf,
}

impl LyricCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Case-insensitive, filesystem-safe key for a song.
    pub fn key(song: &Song) -> String {
        format!("{}-{}", slugify(&song.artist), slugify(&song.title))
    }

    pub fn path(&self, song: &Song) -> PathBuf {
        self.dir.join(format!("{}.txt", Self::key(song)))
    }

    pub fn get(&self, song: &Song) -> Result<Option<String>> {
        let path = self.path(song);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    pub fn put(&self, song: &Song, lyrics: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(song), lyrics)?;
        Ok(())
    }
}

// ============================================================================
// Fetcher
// ============================================================================

pub struct LyricFetcher<P, T = ThreadSleep> {
    cache: LyricCache,
    provider: P,
    throttle: T,
    delay: Duration,
}

impl<P: LyricsProvider> LyricFetcher<P, ThreadSleep> {
    pub fn new(config: &LyricCacheConfig, provider: P) -> Self {
        Self::with_throttle(config, provider, ThreadSleep)
    }
}

impl<P: LyricsProvider, T: Throttle> LyricFetcher<P, T> {
    pub fn with_throttle(config: &LyricCacheConfig, provider: P, throttle: T) -> Self {
        Self {
            cache: LyricCache::new(&config.dir),
            provider,
            throttle,
            delay: config.delay,
        }
    }

    pub fn cache(&self) -> &LyricCache {
        &self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn throttle(&self) -> &T {
        &self.throttle
    }

    /// Lyrics for `song`, or `""` when none can be found. Never fails.
    pub fn fetch(&mut self, song: &Song) -> String {
        match self.cache.get(song) {
            Ok(Some(lyrics)) => {
                log::debug!("{} in cache", song.title);
                return lyrics;
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Unreadable cache entry for {}: {}", song.title, e);
                return String::new();
            }
        }

        let found = self.provider.search(&song.title, &song.artist);
        self.throttle.pause(self.delay);

        match found {
            Ok(Some(lyrics)) if !lyrics.is_empty() => {
                if let Err(e) = self.cache.put(song, &lyrics) {
                    log::warn!("Could not cache lyrics for {}: {}", song.title, e);
                }
                lyrics
            }
            Ok(_) => {
                log::warn!("No lyrics found for {}", song);
                String::new()
            }
            Err(e) => {
                log::warn!("Error fetching lyrics for {}: {}", song, e);
                String::new()
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
