//! Library playlist creation endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::GatewayError, AppState};

/// Creation request body.
///
/// All fields default when absent; nothing is validated locally. Upstream is
/// the sole authority on acceptance.
#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub track_ids: Vec<String>,
}

/// POST /create_playlist
///
/// Forwards the creation payload upstream, preserving the caller's track
/// order, and relays the upstream response verbatim.
pub async fn create_playlist(
    State(state): State<AppState>,
    Json(request): Json<CreatePlaylistRequest>,
) -> Result<Json<Value>, GatewayError> {
    let body = state
        .client
        .create_playlist(&request.name, &request.description, &request.track_ids)
        .await?;
    Ok(Json(body))
}
