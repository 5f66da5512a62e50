//! ampm-gw library - API Gateway module
//!
//! Fronts the Apple Music API for the playlist-manager front end so the
//! browser never holds the developer or user tokens itself. Handlers are
//! thin translation layers over the upstream client; the gateway relays
//! upstream responses without interpretation.

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::upstream::AppleMusicClient;

pub mod api;
pub mod config;
pub mod error;
pub mod upstream;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Authenticated upstream client; credentials are immutable for the
    /// process lifetime
    pub client: Arc<AppleMusicClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(client: AppleMusicClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/search", get(api::search))
        .route("/tracks/:playlist_id", get(api::playlist_tracks))
        .route("/create_playlist", post(api::create_playlist))
        .merge(api::health_routes())
        // The front end is served from a separate dev-server origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
