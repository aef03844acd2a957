use crate::error::ConfigError;
use crate::journal::StatusFieldMatcher;
use crate::journal::matcher::DEFAULT_STATUS_FIELDS;
use crate::timeline::MinimumUnit;
use crate::timeline::TimelineOptions;
use crate::timeline::reconstruct::{DEFAULT_ONGOING_SUFFIX, DEFAULT_UNKNOWN_ACTOR};
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".wp-timeline";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TimelineConfig {
    /// Journal field names treated as the status field (case-insensitive)
    #[serde(default = "default_status_fields")]
    pub status_fields: Vec<String>,
    #[serde(default)]
    pub minimum_unit: MinimumUnit,
    /// Marker appended to the dwell time of the current status
    #[serde(default = "default_ongoing_suffix")]
    pub ongoing_suffix: Option<String>,
    #[serde(default = "default_unknown_actor")]
    pub unknown_actor: String,
}

fn default_status_fields() -> Vec<String> {
    DEFAULT_STATUS_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn default_ongoing_suffix() -> Option<String> {
    Some(DEFAULT_ONGOING_SUFFIX.to_string())
}

fn default_unknown_actor() -> String {
    DEFAULT_UNKNOWN_ACTOR.to_string()
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            status_fields: default_status_fields(),
            minimum_unit: MinimumUnit::default(),
            ongoing_suffix: default_ongoing_suffix(),
            unknown_actor: default_unknown_actor(),
        }
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status_fields.is_empty() {
            return Err(ConfigError::NoStatusFields);
        }
        if self.status_fields.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::BlankStatusField);
        }
        if self.unknown_actor.trim().is_empty() {
            return Err(ConfigError::BlankUnknownActor);
        }
        Ok(())
    }

    pub fn to_options(&self) -> TimelineOptions {
        TimelineOptions {
            status_fields: StatusFieldMatcher::new(&self.status_fields),
            minimum_unit: self.minimum_unit,
            ongoing_suffix: self.ongoing_suffix.clone(),
            unknown_actor: self.unknown_actor.clone(),
        }
    }
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.timeline
            .validate()
            .context("Invalid [timeline] configuration")?;
        Ok(())
    }
}

/// Directory holding `config.toml`: `~/.wp-timeline`, or the platform config
/// directory when no home directory is available.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = home::home_dir() {
        return Ok(home.join(CONFIG_DIR_NAME));
    }
    dirs::config_dir()
        .map(|dir| dir.join("wp-timeline"))
        .context("Could not find home or config directory")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;

    config.validate()?;
    Ok(config)
}

/// Loads the user configuration, falling back to defaults when no file exists.
pub fn load() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    load_from_path(&path).with_context(|| format!("Failed to load {}", path.display()))
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
