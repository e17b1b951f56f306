//! Application configuration management.
//!
//! Settings here provide defaults for report runs; command-line flags
//! override them. The file is JSON:
//!
//! ```json
//! {
//!   "field_separator": "|",
//!   "min_size": 4096,
//!   "suppress_vertical_whitespace": false,
//!   "output": "text"
//! }
//! ```

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{parse_separator, OutputFormat};
use crate::record::DEFAULT_SEPARATOR;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field separator, in any spelling accepted by `--field-separator`
    pub field_separator: Option<String>,
    /// Default minimum report size in bytes
    pub min_size: u64,
    /// Omit blank lines between duplicate groups
    pub suppress_vertical_whitespace: bool,
    /// Default report format
    pub output: OutputFormat,
}

impl Config {
    /// Load the configuration from `path`, or from the default
    /// platform-specific path when `path` is `None`.
    ///
    /// Missing or unreadable files yield the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::config_path().ok(),
        };
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config {}, using defaults: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The configured separator, falling back to NUL.
    ///
    /// An invalid value is logged and ignored.
    #[must_use]
    pub fn separator(&self) -> char {
        match self.field_separator.as_deref().map(parse_separator) {
            Some(Ok(c)) => c,
            Some(Err(e)) => {
                log::warn!("Ignoring field_separator from config: {e}");
                DEFAULT_SEPARATOR
            }
            None => DEFAULT_SEPARATOR,
        }
    }

    /// Get the default platform-specific configuration path.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("org", "dupgroup", "dupgroup")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}
