//! Configuration management
//!
//! Manages defaults for new users' learning prompt preferences, the content
//! source and where preference snapshots are stored.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::learning::preferences::AutoShowPolicy;
use crate::types::ExplanationLevel;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults applied to users without stored preferences
    #[serde(default)]
    pub prompts: PromptsConfig,
    /// Content source
    #[serde(default)]
    pub content: ContentConfig,
    /// Preference snapshot storage
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub auto_show: AutoShowPolicy,
    #[serde(default)]
    pub preferred_level: ExplanationLevel,
    /// Days before a dismissed prompt may reappear
    #[serde(default = "default_show_after_dismiss_days")]
    pub show_after_dismiss_days: u32,
}

fn default_true() -> bool {
    true
}

fn default_show_after_dismiss_days() -> u32 {
    30
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_show: AutoShowPolicy::default(),
            preferred_level: ExplanationLevel::default(),
            show_after_dismiss_days: default_show_after_dismiss_days(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// JSON content file; the built-in sample registry is used when unset
    #[serde(default)]
    pub registry_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory for preference snapshots; defaults to `<data_dir>/preferences`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Configured directory or the default one
    pub fn resolved_dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("preferences")),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "symptom-learning", "symptom-learning")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "symptom-learning", "symptom-learning")
        .context("Failed to get project directories")?;
    Ok(base.data_dir().to_path_buf())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("Learning prompts");
    println!("  enabled:                 {}", config.prompts.enabled);
    println!("  auto_show:               {}", config.prompts.auto_show);
    println!(
        "  preferred_level:         {} ({})",
        config.prompts.preferred_level,
        config.prompts.preferred_level.name()
    );
    println!("  show_after_dismiss_days: {}", config.prompts.show_after_dismiss_days);
    println!("Content");
    match &config.content.registry_path {
        Some(path) => println!("  registry_path:           {}", path.display()),
        None => println!("  registry_path:           (built-in sample)"),
    }
    println!("Store");
    println!("  dir:                     {}", config.store.resolved_dir()?.display());
    println!("\nConfig file: {}", config_path()?.display());
    Ok(())
}

/// Default configuration rendered as TOML
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.prompts.show_after_dismiss_days, 30);
        assert_eq!(config.prompts.preferred_level.get(), 2);
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            [prompts]
            auto_show = "new-symptoms-only"
            preferred_level = 4

            [content]
            registry_path = "/srv/content/prompts.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.prompts.auto_show, AutoShowPolicy::NewSymptomsOnly);
        assert_eq!(config.prompts.preferred_level.get(), 4);
        assert!(config.prompts.enabled);
        assert_eq!(
            config.content.registry_path,
            Some(PathBuf::from("/srv/content/prompts.json"))
        );
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(toml::from_str::<Config>("[prompts]\npreferred_level = 0\n").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.prompts.show_after_dismiss_days = 14;
        config.store.dir = Some(dir.path().join("prefs"));
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
