//! Spotify Web API client (client-credentials flow).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::catalog::{CatalogApi, CatalogPage, PlaylistId};
use crate::error::{Error, Result};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE_URL: &str = "https://api.spotify.com/v1";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
const PROVIDER: &str = "spotify";

/// Application credentials, normally from `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`.
#[derive(Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl SpotifyCredentials {
    /// Both values must be present and non-empty.
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Result<Self> {
        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Ok(Self {
                    client_id,
                    client_secret,
                })
            }
            _ => Err(Error::Config(
                "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET are required for playlist links"
                    .to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for SpotifyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct SpotifyClient {
    http: Client,
    access_token: String,
}

impl SpotifyClient {
    /// Exchange the credentials for an app access token.
    pub fn connect(credentials: &SpotifyCredentials) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::provider(PROVIDER, e))?;

        let token: TokenResponse = http
            .post(TOKEN_URL)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| Error::provider(PROVIDER, e))?;

        log::debug!("Obtained Spotify access token");
        Ok(Self {
            http,
            access_token: token.access_token,
        })
    }
}

impl CatalogApi for SpotifyClient {
    fn playlist_page(
        &self,
        playlist: &PlaylistId,
        offset: usize,
        limit: usize,
    ) -> Result<CatalogPage> {
        let url = format!("{}/playlists/{}/tracks", API_BASE_URL, playlist.as_str());
        let offset = offset.to_string();
        let limit = limit.to_string();

        self.http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("offset", offset.as_str()),
                ("limit", limit.as_str()),
                // skip podcast episodes
                ("additional_types", "track"),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| Error::provider(PROVIDER, e))
    }
}
