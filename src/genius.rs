//! Genius lyrics provider.
//!
//! The API only returns song metadata, so lyrics are scraped from the song
//! page's lyric containers.

use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::lyrics::LyricsProvider;

const SEARCH_URL: &str = "https://api.genius.com/search";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
const PROVIDER: &str = "genius";
const LYRICS_CONTAINER: &str = r#"div[data-lyrics-container="true"]"#;

// ============================================================================
// Search Payloads
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: String,
    pub result: HitResult,
}

#[derive(Debug, Deserialize)]
pub struct HitResult {
    pub title: String,
    pub url: String,
    pub primary_artist: HitArtist,
}

#[derive(Debug, Deserialize)]
pub struct HitArtist {
    pub name: String,
}

/// Lowercase alphanumerics only, for loose title comparison.
fn clean(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Choose the song hit whose title equals `title` (ignoring case and
/// punctuation), else the first song hit.
pub fn pick_hit<'a>(hits: &'a [SearchHit], title: &str) -> Option<&'a SearchHit> {
    let wanted = clean(title);
    let songs = || hits.iter().filter(|h| h.kind == "song");
    songs()
        .find(|h| clean(&h.result.title) == wanted)
        .or_else(|| songs().next())
}

/// Text of every lyric container on a song page, `<br>` as newlines.
/// `None` when the page has no lyric containers (instrumentals, removed songs).
pub fn extract_lyrics(html: &str) -> Result<Option<String>> {
    let selector = Selector::parse(LYRICS_CONTAINER)
        .map_err(|e| Error::provider(PROVIDER, format!("bad selector: {:?}", e)))?;
    let document = Html::parse_document(html);

    let mut blocks = Vec::new();
    for container in document.select(&selector) {
        let mut block = String::new();
        for node in container.descendants() {
            if let Some(text) = node.value().as_text() {
                block.push_str(text);
            } else if node.value().as_element().is_some_and(|e| e.name() == "br") {
                block.push('\n');
            }
        }
        blocks.push(block);
    }

    if blocks.is_empty() {
        return Ok(None);
    }
    Ok(Some(blocks.join("\n").trim().to_string()))
}

// ============================================================================
// Client
// ============================================================================

pub struct GeniusClient {
    http: Client,
    access_token: String,
}

impl GeniusClient {
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(Error::Config("GENIUS_ACCESS_TOKEN is empty".to_string()));
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::provider(PROVIDER, e))?;
        Ok(Self { http, access_token })
    }

    fn search_hits(&self, title: &str, artist: &str) -> Result<Vec<SearchHit>> {
        let query = format!("{} {}", title, artist);
        let envelope: SearchEnvelope = self
            .http
            .get(SEARCH_URL)
            .bearer_auth(&self.access_token)
            .query(&[("q", query.as_str())])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| Error::provider(PROVIDER, e))?;
        Ok(envelope.response.hits)
    }

    fn song_page(&self, url: &str) -> Result<String> {
        self.http
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| Error::provider(PROVIDER, e))
    }
}

impl LyricsProvider for GeniusClient {
    fn search(&mut self, title: &str, artist: &str) -> Result<Option<String>> {
        let hits = self.search_hits(title, artist)?;
        let Some(hit) = pick_hit(&hits, title) else {
            return Ok(None);
        };
        log::debug!(
            "Genius match for {:?}: {} by {}",
            title,
            hit.result.title,
            hit.result.primary_artist.name
        );
        let page = self.song_page(&hit.result.url)?;
        extract_lyrics(&page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(json: &str) -> Vec<SearchHit> {
        serde_json::from_str::<SearchEnvelope>(json).unwrap().response.hits
    }

    const SEARCH_JSON: &str = r#"{
        "meta": {"status": 200},
        "response": {"hits": [
            {"type": "song", "result": {"title": "Creep (Acoustic)", "url": "https://genius.com/a",
                "primary_artist": {"name": "Radiohead"}}},
            {"type": "song", "result": {"title": "Creep", "url": "https://genius.com/b",
                "primary_artist": {"name": "Radiohead"}}}
        ]}
    }"#;

    #[test]
    fn test_pick_hit_prefers_exact_title() {
        let hits = hits(SEARCH_JSON);
        assert_eq!(pick_hit(&hits, "creep").unwrap().result.url, "https://genius.com/b");
    }

    #[test]
    fn test_pick_hit_falls_back_to_first_song() {
        let hits = hits(SEARCH_JSON);
        assert_eq!(
            pick_hit(&hits, "Creep - Live").unwrap().result.url,
            "https://genius.com/a"
        );
        assert!(pick_hit(&[], "Creep").is_none());
    }

    #[test]
    fn test_extract_lyrics_joins_containers() {
        let html = r#"<html><body>
            <div data-lyrics-container="true">[Verse 1]<br>When you were here before<br><i>Couldn't</i> look you in the eye</div>
            <div class="ad">Buy tickets</div>
            <div data-lyrics-container="true">[Chorus]<br>But I'm a creep</div>
        </body></html>"#;
        assert_eq!(
            extract_lyrics(html).unwrap().unwrap(),
            "[Verse 1]\nWhen you were here before\nCouldn't look you in the eye\n[Chorus]\nBut I'm a creep"
        );
    }

    #[test]
    fn test_extract_lyrics_missing_container() {
        assert_eq!(extract_lyrics("<html><body>Instrumental</body></html>").unwrap(), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(GeniusClient::new(""), Err(Error::Config(_))));
    }
}
