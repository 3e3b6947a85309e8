//! Joystick configuration.
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! enabled = true
//! axis_threshold = 0.15
//! retain_disconnected = false
//! probe_limit = 16
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of joystick slots probed at startup by default.
pub const DEFAULT_PROBE_LIMIT: u32 = 16;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JoystickConfig {
    /// Enable joystick support when the manager is built.
    pub enabled: bool,

    /// Global deadzone. Raw readings with a smaller magnitude are stored as `0.0`.
    pub axis_threshold: f32,

    /// Keep disconnected joysticks in the registry until support is disabled.
    ///
    /// Off by default: a disconnect erases the entry after the `Disconnected`
    /// notification, so a reconnect on the same id starts clean.
    pub retain_disconnected: bool,

    /// Upper bound on ids probed when support is enabled.
    pub probe_limit: u32,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            axis_threshold: 0.0,
            retain_disconnected: false,
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }
}

impl JoystickConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.axis_threshold)
    }
}

pub(crate) fn validate_threshold(threshold: f32) -> Result<()> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}
