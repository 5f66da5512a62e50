//! Playlist search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::GatewayError, AppState};

/// Query parameters for playlist search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term. A missing parameter forwards an empty term;
    /// upstream decides what that means.
    #[serde(default)]
    pub query: String,
}

/// GET /search?query=<text>
///
/// Relays the upstream catalog search response without interpretation.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, GatewayError> {
    let body = state.client.search_playlists(&params.query).await?;
    Ok(Json(body))
}
