//! Loader configuration: where to look for `.xsc` files and which
//! interpolation mode to attach to discovered molecules.
//!
//! ```toml
//! xsec_path = "/data/hitran/xsc"
//! xsec_interpolation = "linear"
//! ```

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Deserialize;
use thiserror::Error;

use crate::table::InterpMode;

/// Errors produced while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[cfg(feature = "serde")]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Explicit configuration passed to discovery and assembly entry points.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct XscConfig {
    /// Directory scanned for `.xsc` files. Unset means nothing to discover.
    pub xsec_path: Option<PathBuf>,
    /// Default mode for discovered molecules; linear when unset.
    pub xsec_interpolation: Option<InterpMode>,
}

impl XscConfig {
    #[must_use]
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            xsec_path: Some(path.into()),
            xsec_interpolation: None,
        }
    }

    /// Effective interpolation mode.
    #[must_use]
    pub fn interpolation(&self) -> InterpMode {
        self.xsec_interpolation.unwrap_or_default()
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    #[cfg(feature = "serde")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
