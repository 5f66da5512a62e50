//! Upstream catalog service clients

pub mod apple_music;

pub use apple_music::{AppleMusicClient, Credentials};
