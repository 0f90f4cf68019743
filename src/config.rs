//! TOML configuration.
//!
//! ```toml
//! [normalize]
//! extra_terms = ["topic", "full album"]
//! platform = "YouTube"
//!
//! [search]
//! scheme = "music"
//! host = "music.apple.com"
//! path = "/search"
//! query_key = "term"
//! ```
//!
//! Every field is optional; missing values fall back to the defaults above
//! (with no extra terms).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::launcher::SearchRequest;
use crate::normalize::DEFAULT_PLATFORM;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub normalize: NormalizeConfig,
    pub search: SearchRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Phrases removed in addition to the built-in boilerplate terms.
    pub extra_terms: Vec<String>,
    /// Site name stripped when it trails the title as ` - <platform>`.
    pub platform: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            extra_terms: Vec::new(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
