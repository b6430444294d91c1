//! Configuration file support for Fuelplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fuelplan/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub plan: PlanConfig,
}

/// Data file path configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    /// The WHOOP tabular export to analyze
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// Where the structured meal plan is written
    #[serde(default = "default_plan_path")]
    pub plan_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            plan_path: default_plan_path(),
        }
    }
}

/// Meal-plan request parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_budget_dollars")]
    pub budget_dollars: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            budget_dollars: default_budget_dollars(),
        }
    }
}

// Default value functions
fn data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("fuelplan")
}

fn default_export_path() -> PathBuf {
    data_dir().join("whoop_data.csv")
}

fn default_plan_path() -> PathBuf {
    data_dir().join("meal_plan.json")
}

fn default_budget_dollars() -> u32 {
    150
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("fuelplan").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.plan.budget_dollars, 150);
        assert!(config.data.export_path.ends_with("whoop_data.csv"));
        assert!(config.data.plan_path.ends_with("meal_plan.json"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::default();
        config.save_to(&path).unwrap();
        let parsed = Config::load_from(&path).unwrap();

        assert_eq!(config.plan.budget_dollars, parsed.plan.budget_dollars);
        assert_eq!(config.data.export_path, parsed.data.export_path);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[plan]
budget_dollars = 120
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.plan.budget_dollars, 120);
        assert!(config.data.export_path.ends_with("whoop_data.csv")); // default
    }
}
