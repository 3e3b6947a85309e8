//! Crate error type.
//!
//! Frame-time operations (polling, connection handling, callback registration)
//! never fail. Errors only surface while building a [`Manager`](crate::Manager):
//! loading configuration, validating the deadzone, or opening a backend.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid joystick config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Deadzone must be finite and non-negative.
    #[error("invalid axis threshold {0}: must be finite and >= 0")]
    InvalidThreshold(f32),

    #[error("joystick backend unavailable: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;
