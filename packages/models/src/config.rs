//! TOML run configuration.
//!
//! The built-in defaults live in `config/default.toml` and are embedded at
//! compile time. A user-supplied file only needs the keys it overrides;
//! everything else falls back to [`Default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The embedded default configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has the wrong shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Top-level configuration for both pipelines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keynotes: KeynotesConfig,
    pub phytochemicals: PhytochemicalsConfig,
}

impl Config {
    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the string is not a valid config.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`toml::ser::Error`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `path` is given and cannot be loaded.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Markers used to segment the Keynotes PDF text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeynotesConfig {
    /// Everything up to and including the first occurrence of this marker
    /// is front matter and is discarded.
    pub intro_marker: String,
    /// Page running header, dropped wherever it appears.
    pub running_header: String,
    /// Starts a section that is skipped until the next blank line or drug
    /// header.
    pub relationship_marker: String,
    pub amelioration_marker: String,
    pub aggravation_marker: String,
}

impl Default for KeynotesConfig {
    fn default() -> Self {
        Self {
            intro_marker: "Copyright © MEDI-T 1998".to_owned(),
            running_header: "Keynotes by H.C. Allen".to_owned(),
            relationship_marker: "Relationship".to_owned(),
            amelioration_marker: "Amelioration.".to_owned(),
            aggravation_marker: "Aggravation.".to_owned(),
        }
    }
}

/// Settings for the phytochemical table scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhytochemicalsConfig {
    /// URL with a `{plant}` placeholder substituted per plant name.
    pub url_template: String,
    /// CSS selector for the table to extract. Only the first match is used.
    pub table_selector: String,
    /// Delay between consecutive plant requests, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    /// Overrides the HTTP `User-Agent` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for PhytochemicalsConfig {
    fn default() -> Self {
        Self {
            url_template: "https://cb.imsc.res.in/imppat/phytochemical/{plant}".to_owned(),
            table_selector: "table".to_owned(),
            delay_ms: None,
            user_agent: None,
        }
    }
}
