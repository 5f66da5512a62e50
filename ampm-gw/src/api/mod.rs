//! HTTP API handlers for ampm-gw

pub mod health;
pub mod playlists;
pub mod search;
pub mod tracks;

pub use health::health_routes;
pub use playlists::create_playlist;
pub use search::search;
pub use tracks::playlist_tracks;
