//! Configuration file support for the HealthSmart engine.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/healthsmart/config.toml`.

use crate::{Error, Gender, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub random: RandomConfig,
}

/// Planning parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Age plugged into the BMR formula (reports carry no age)
    #[serde(default = "default_assumed_age")]
    pub assumed_age: u32,

    /// Length of a generated plan in days
    #[serde(default = "default_plan_days")]
    pub plan_days: u32,

    /// Gender used when a report does not state one
    #[serde(default)]
    pub default_gender: Gender,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assumed_age: default_assumed_age(),
            plan_days: default_plan_days(),
            default_gender: Gender::default(),
        }
    }
}

/// Random selection configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct RandomConfig {
    /// Fixed seed for reproducible plans; unset means a fresh seed per run
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default value functions
fn default_assumed_age() -> u32 {
    28
}

fn default_plan_days() -> u32 {
    30
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("healthsmart").join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.engine.plan_days == 0 {
            return Err(Error::Config("engine.plan_days must be at least 1".into()));
        }
        if self.engine.assumed_age == 0 {
            return Err(Error::Config("engine.assumed_age must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.assumed_age, 28);
        assert_eq!(config.engine.plan_days, 30);
        assert_eq!(config.engine.default_gender, Gender::Female);
        assert!(config.random.seed.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.random.seed = Some(42);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.engine.plan_days, parsed.engine.plan_days);
        assert_eq!(parsed.random.seed, Some(42));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[engine]
default_gender = "male"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.default_gender, Gender::Male);
        assert_eq!(config.engine.assumed_age, 28); // default
        assert_eq!(config.engine.plan_days, 30); // default
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[random]\nseed = 7\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.random.seed, Some(7));
    }

    #[test]
    fn test_zero_plan_days_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[engine]\nplan_days = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
