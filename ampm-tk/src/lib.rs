//! ampm-tk library - Apple Music developer token generator
//!
//! Signs an ES256 developer token from a local key-material config file.
//! The binary wraps this in a one-shot interactive flow.

pub mod config;
pub mod token;
