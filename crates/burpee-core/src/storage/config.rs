//! TOML-based application configuration.
//!
//! Stores presentation defaults only:
//! - Sound on/off for step tones
//! - Default workout parameters for runs started without flags
//!
//! Workout state itself is never persisted. Configuration is stored at
//! `~/.config/burpee/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{CycleKind, WorkoutParams};

/// Default workout parameters, used when a run omits the matching flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDefaults {
    #[serde(default = "default_duration_min")]
    pub duration_min: u32,
    #[serde(default = "default_total_reps")]
    pub total_reps: u32,
    #[serde(default = "default_cycle")]
    pub cycle: CycleKind,
    /// Fixed active seconds per burpee; unset means auto split.
    #[serde(default)]
    pub custom_rep_secs: Option<f64>,
    #[serde(default = "default_prep_secs")]
    pub prep_secs: u32,
}

/// Sound configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Step tones start muted; `run --sound` or this flag turns them on.
    #[serde(default)]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/burpee/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workout: WorkoutDefaults,
    #[serde(default)]
    pub sound: SoundConfig,
}

// Default functions
fn default_duration_min() -> u32 {
    10
}
fn default_total_reps() -> u32 {
    30
}
fn default_cycle() -> CycleKind {
    CycleKind::NavySeal
}
fn default_prep_secs() -> u32 {
    10
}

impl Default for WorkoutDefaults {
    fn default() -> Self {
        Self {
            duration_min: default_duration_min(),
            total_reps: default_total_reps(),
            cycle: default_cycle(),
            custom_rep_secs: None,
            prep_secs: default_prep_secs(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self { enabled: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workout: WorkoutDefaults::default(),
            sound: SoundConfig::default(),
        }
    }
}

impl WorkoutDefaults {
    pub fn to_params(&self) -> WorkoutParams {
        WorkoutParams {
            duration_min: self.duration_min,
            total_reps: self.total_reps,
            cycle: self.cycle,
            custom_rep_secs: self.custom_rep_secs,
            prep_secs: self.prep_secs,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "workout.duration_min" => Some(self.workout.duration_min.to_string()),
            "workout.total_reps" => Some(self.workout.total_reps.to_string()),
            "workout.cycle" => Some(self.workout.cycle.to_string()),
            "workout.custom_rep_secs" => Some(
                self.workout
                    .custom_rep_secs
                    .map_or_else(|| "auto".to_string(), |secs| secs.to_string()),
            ),
            "workout.prep_secs" => Some(self.workout.prep_secs.to_string()),
            "sound.enabled" => Some(self.sound.enabled.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "workout.duration_min" => {
                self.workout.duration_min = value.parse().map_err(|_| {
                    invalid(format!("cannot parse '{value}' as minutes"))
                })?;
            }
            "workout.total_reps" => {
                self.workout.total_reps = value.parse().map_err(|_| {
                    invalid(format!("cannot parse '{value}' as a count"))
                })?;
            }
            "workout.cycle" => {
                self.workout.cycle = match value {
                    "military" => CycleKind::Military,
                    "navy-seal" => CycleKind::NavySeal,
                    _ => {
                        return Err(invalid(format!(
                            "expected 'military' or 'navy-seal', got '{value}'"
                        )))
                    }
                };
            }
            "workout.custom_rep_secs" => {
                self.workout.custom_rep_secs = if value == "auto" {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        invalid(format!("cannot parse '{value}' as seconds"))
                    })?)
                };
            }
            "workout.prep_secs" => {
                self.workout.prep_secs = value.parse().map_err(|_| {
                    invalid(format!("cannot parse '{value}' as seconds"))
                })?;
            }
            "sound.enabled" => {
                self.sound.enabled = value.parse().map_err(|_| {
                    invalid(format!("cannot parse '{value}' as a bool"))
                })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
