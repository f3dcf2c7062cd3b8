use crate::error::{CleanerError, Result};
use crate::types::{RuleSet, ValidationRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Cleaning operations applied to every extracted table.
///
/// Application order is fixed regardless of which stages are enabled:
/// fill missing values, then lowercase, then deduplicate rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub fill_missing_values: bool,
    pub default_value: String,
    pub convert_text_to_lowercase: bool,
    pub remove_duplicate_rows: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transform: TransformConfig,
    pub validation: RuleSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transform: TransformConfig::default(),
            validation: default_rules(),
        }
    }
}

/// The built-in rule set: `age` in 1..=100, `score` in 0..=100, both required.
pub fn default_rules() -> RuleSet {
    let mut rules = RuleSet::new();
    rules.insert(
        "age".to_string(),
        ValidationRule { required: true, min: Some(1.0), max: Some(100.0) },
    );
    rules.insert(
        "score".to_string(),
        ValidationRule { required: true, min: Some(0.0), max: Some(100.0) },
    );
    rules
}

impl Config {
    /// Loads configuration from a TOML file. A missing file falls back to the
    /// built-in defaults; a malformed file is a hard error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
