//! User-tunable settings.
//!
//! ```toml
//! selection_delay_ms = 200
//! edit_delay_ms = 700
//! status_prefix = "YAML Path: "
//! status_key = "YamlPath"
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for hosts that show the path while the user moves around.
///
/// Every field is optional in the file; missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Quiet period after a cursor move before the path is recomputed.
    pub selection_delay_ms: u64,

    /// Quiet period after an edit before the region is re-parsed.
    pub edit_delay_ms: u64,

    /// Text put in front of the joined paths.
    pub status_prefix: String,

    /// Identifier under which hosts register the status entry.
    pub status_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selection_delay_ms: 200,
            edit_delay_ms: 700,
            status_prefix: "YAML Path: ".to_string(),
            status_key: "YamlPath".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn selection_delay(&self) -> Duration {
        Duration::from_millis(self.selection_delay_ms)
    }

    pub fn edit_delay(&self) -> Duration {
        Duration::from_millis(self.edit_delay_ms)
    }
}
