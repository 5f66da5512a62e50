//! Apple Music API client
//!
//! Authenticated wrapper over the three catalog/library endpoints the
//! gateway fronts. Every request carries the developer bearer token and the
//! `Music-User-Token` header; no call path bypasses them. Responses are
//! relayed without interpretation, except track listing which extracts the
//! ordered track ids from a typed response shape.

use ampm_common::{Error, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const APPLE_MUSIC_BASE_URL: &str = "https://api.music.apple.com/v1";
const USER_TOKEN_HEADER: &str = "Music-User-Token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credential pair authorizing upstream calls
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Bearer token identifying the calling application
    pub developer_token: String,
    /// Token identifying the authorized end user
    pub user_token: String,
}

/// Playlist detail response, reduced to the fields the gateway navigates.
///
/// Everything else in the upstream document is irrelevant to track listing
/// and is ignored during deserialization.
#[derive(Debug, Deserialize)]
pub struct PlaylistDocument {
    #[serde(default)]
    pub data: Vec<PlaylistResource>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistResource {
    pub relationships: Option<PlaylistRelationships>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistRelationships {
    pub tracks: Option<TrackRelationship>,
}

#[derive(Debug, Deserialize)]
pub struct TrackRelationship {
    #[serde(default)]
    pub data: Vec<TrackRef>,
}

#[derive(Debug, Deserialize)]
pub struct TrackRef {
    pub id: String,
}

/// Apple Music API client
pub struct AppleMusicClient {
    http_client: reqwest::Client,
    credentials: Credentials,
    storefront: String,
    base_url: String,
}

impl AppleMusicClient {
    pub fn new(credentials: Credentials, storefront: impl Into<String>) -> Result<Self> {
        Self::with_base_url(credentials, storefront, APPLE_MUSIC_BASE_URL)
    }

    /// Client with an overridden base URL. Integration tests point this at a
    /// stub upstream server.
    pub fn with_base_url(
        credentials: Credentials,
        storefront: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            credentials,
            storefront: storefront.into(),
            base_url: base_url.into(),
        })
    }

    /// Search the catalog for playlists matching `term`.
    ///
    /// The upstream body is returned verbatim; its shape is opaque to the
    /// gateway. An empty term is forwarded as-is and upstream decides.
    pub async fn search_playlists(&self, term: &str) -> Result<Value> {
        let url = format!(
            "{}/catalog/{}/search",
            self.base_url, self.storefront
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("term", term), ("types", "playlists")])
            .bearer_auth(&self.credentials.developer_token)
            .header(USER_TOKEN_HEADER, &self.credentials.user_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = check_status(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::UpstreamShape(format!("search response is not JSON: {e}")))
    }

    /// Fetch a playlist and return its track ids in upstream order.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/catalog/{}/playlists/{}",
            self.base_url, self.storefront, playlist_id
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.credentials.developer_token)
            .header(USER_TOKEN_HEADER, &self.credentials.user_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = check_status(response).await?;
        let document: PlaylistDocument = serde_json::from_str(&body)
            .map_err(|e| Error::UpstreamShape(format!("playlist response: {e}")))?;

        extract_track_ids(document)
    }

    /// Create a library playlist from an ordered set of track ids.
    ///
    /// No local validation of name, description, or ids; upstream is the
    /// sole authority on acceptance. The upstream body is returned verbatim.
    pub async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        track_ids: &[String],
    ) -> Result<Value> {
        let url = format!("{}/me/library/playlists", self.base_url);
        let payload = create_playlist_payload(name, description, track_ids);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.credentials.developer_token)
            .header(USER_TOKEN_HEADER, &self.credentials.user_token)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = check_status(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::UpstreamShape(format!("create response is not JSON: {e}")))
    }
}

/// Extract track ids from a playlist document, preserving upstream order.
///
/// A response without a playlist record, or a record without a tracks
/// relationship, is a shape error, never an empty list. An empty list is
/// reserved for a playlist that genuinely has zero tracks.
pub fn extract_track_ids(document: PlaylistDocument) -> Result<Vec<String>> {
    let playlist = document.data.into_iter().next().ok_or_else(|| {
        Error::UpstreamShape("playlist response contained no playlist record".to_string())
    })?;

    let tracks = playlist
        .relationships
        .and_then(|r| r.tracks)
        .ok_or_else(|| {
            Error::UpstreamShape("playlist record has no tracks relationship".to_string())
        })?;

    Ok(tracks.data.into_iter().map(|track| track.id).collect())
}

/// Build the library-playlist creation payload.
///
/// Track order and count follow the caller exactly; each id is wrapped as
/// `{id, type: "songs"}`.
pub fn create_playlist_payload(name: &str, description: &str, track_ids: &[String]) -> Value {
    json!({
        "attributes": {
            "name": name,
            "description": description,
        },
        "relationships": {
            "tracks": {
                "data": track_ids
                    .iter()
                    .map(|id| json!({ "id": id, "type": "songs" }))
                    .collect::<Vec<_>>(),
            }
        }
    })
}

fn map_transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else {
        Error::Network(err.to_string())
    }
}

/// Read the body and classify non-success statuses as upstream errors,
/// carrying the raw body for the caller to relay.
async fn check_status(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(map_transport_error)?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(Error::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}
