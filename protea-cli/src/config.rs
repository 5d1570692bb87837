use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use protea_core::category::KeywordRule;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reconciliation tolerance in ZAR.
    pub tolerance: f64,
    /// Extra noise patterns appended to the built-in set.
    pub noise_patterns: Vec<String>,
    /// Category keyword rules checked ahead of the built-in table.
    pub categories: Vec<KeywordRule>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tolerance: 0.01,
            noise_patterns: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Load a TOML config; no path means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use protea_core::category::Category;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.tolerance, 0.01);
        assert!(cfg.noise_patterns.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
tolerance = 0.05
noise_patterns = ["(?i)^promotional"]

[[categories]]
category = "education"
keywords = ["tuckshop", "stationery"]
"#;
        let cfg: Config = toml::from_str(raw).unwrap();
        assert_eq!(cfg.tolerance, 0.05);
        assert_eq!(cfg.noise_patterns.len(), 1);
        assert_eq!(cfg.categories[0].category, Category::EducationAndSchool);
        assert_eq!(cfg.categories[0].keywords, vec!["tuckshop", "stationery"]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = toml::from_str("tolerance = 0.10").unwrap();
        assert_eq!(cfg.tolerance, 0.10);
        assert!(cfg.categories.is_empty());
    }
}
