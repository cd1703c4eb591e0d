//! Configuration loading.
//!
//! Filter rules can be supplied as TOML or JSON. The format is picked from
//! the file extension: `.json` is parsed as JSON, anything else as TOML.
//!
//! ```toml
//! [filter.include]
//! match_type = "regexp"
//! metric_names = ["http.*"]
//! regexp = { cache_enabled = true, cache_max_num_entries = 1000 }
//!
//! [filter.exclude]
//! match_type = "strict"
//! metric_names = ["http.server.duration"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filter::MetricFilters;
use crate::{HeimdallError, Result};

/// Filtering stage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: MetricFilters,
}

impl Config {
    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HeimdallError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };
        parsed.map_err(|e| {
            HeimdallError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Parse TOML configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HeimdallError::Configuration(e.to_string()))
    }

    /// Parse JSON configuration.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| HeimdallError::Configuration(e.to_string()))
    }
}
