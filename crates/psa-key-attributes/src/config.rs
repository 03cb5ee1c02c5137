//! Profile configuration
//!
//! The key identifier ranges are supplied by the calling profile. They can be
//! built in code or loaded from a TOML or JSON file:
//!
//! ```toml
//! [key_ids.application]
//! min = 0x1
//! max = 0x3fffffff
//!
//! [key_ids.vendor]
//! min = 0x40000000
//! max = 0x7fffffff
//! ```
//!
//! A missing table leaves that range unconfigured.

use crate::error::{KeyAttributesError, Result};
use crate::identifier::KeyIdRanges;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Configuration of a key management profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Identifier ranges for application and vendor keys
    pub key_ids: KeyIdRanges,
}

impl ProfileConfig {
    /// Parse and validate a TOML profile
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON profile
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a profile, choosing the format from the file extension
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            other => {
                return Err(KeyAttributesError::UnsupportedFormat {
                    extension: other.unwrap_or_default().to_string(),
                })
            }
        };

        debug!(
            path = %path.display(),
            application = ?config.key_ids.application,
            vendor = ?config.key_ids.vendor,
            "loaded key profile"
        );
        Ok(config)
    }

    /// Check the ranges are consistent
    pub fn validate(&self) -> Result<()> {
        self.key_ids.validate()
    }
}
