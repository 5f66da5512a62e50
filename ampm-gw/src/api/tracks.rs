//! Playlist track listing endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::GatewayError, AppState};

/// GET /tracks/:playlist_id
///
/// Returns only the ordered track ids of the playlist, not the full track
/// objects. An upstream response without a playlist record or tracks
/// relationship fails with 502 rather than returning an empty array.
pub async fn playlist_tracks(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<Json<Vec<String>>, GatewayError> {
    let ids = state.client.playlist_tracks(&playlist_id).await?;
    Ok(Json(ids))
}
