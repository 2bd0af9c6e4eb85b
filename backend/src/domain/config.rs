//! Handler configuration.
//!
//! Every field has a default so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! scale: 18
//! is_deletable: true
//! is_editable: false
//! splitter:
//!   delimiter: "\t"
//! display:
//!   max_fraction_digits: 6
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::fixed_point::DisplayConfig;
use crate::domain::models::ScalePrecision;
use crate::domain::tabular_splitter::SplitterConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HandlerConfig {
    /// Initial scale precision (token decimals)
    pub scale: ScalePrecision,
    pub is_deletable: bool,
    pub is_editable: bool,
    /// Refuse amounts that would not be a whole number of real units
    pub require_integral_amounts: bool,
    pub splitter: SplitterConfig,
    pub display: DisplayConfig,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            scale: ScalePrecision::default(),
            is_deletable: true,
            is_editable: true,
            require_integral_amounts: false,
            splitter: SplitterConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl HandlerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid handler configuration")
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&yaml).with_context(|| format!("Failed to load {}", path.display()))
    }
}
