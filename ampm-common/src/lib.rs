//! # AMPM Common Library
//!
//! Shared code for the AMPM binaries including:
//! - Error taxonomy (configuration / upstream / structural failures)
//! - Configuration directory resolution
//! - TOML config read/write helpers

pub mod config;
pub mod error;

pub use error::{Error, Result};
