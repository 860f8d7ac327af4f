//! TOML-based application settings.
//!
//! One flat record: reminder cadence, sound toggle, automatic camera
//! monitoring, distraction threshold. Stored at
//! `~/.config/studybreak/config.toml`.
//!
//! Missing fields take their defaults and unknown fields are ignored,
//! so older and newer builds can share a file. A file that fails to
//! parse altogether is discarded with a warning - settings revert to
//! defaults rather than crashing the caller.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Valid range for `reminder_interval`, in minutes.
pub const REMINDER_INTERVAL_RANGE: RangeInclusive<u32> = 1..=120;
/// Valid range for `distraction_threshold`, in seconds.
pub const DISTRACTION_THRESHOLD_RANGE: RangeInclusive<u32> = 3..=30;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studybreak/config.toml`.
/// Range validation happens once, in [`validate`](Self::validate) on
/// the save path; the engines deliberately accept whatever they are
/// handed (their setters document this).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Study minutes between reminders.
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval: u32,
    /// Ring the terminal bell when a reminder fires.
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Drive the attention detector automatically during sessions.
    #[serde(default)]
    pub auto_mode: bool,
    /// Continuous look-away seconds before a distraction nudge.
    #[serde(default = "default_distraction_threshold")]
    pub distraction_threshold: u32,
}

fn default_reminder_interval() -> u32 {
    25
}
fn default_distraction_threshold() -> u32 {
    5
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reminder_interval: default_reminder_interval(),
            sound_enabled: true,
            auto_mode: false,
            distraction_threshold: default_distraction_threshold(),
        }
    }
}

impl Config {
    /// Location of the config file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Parse a TOML document into a config.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load from disk. A missing file yields defaults; an unreadable
    /// or unparsable one is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load from disk, falling back to defaults on any error.
    ///
    /// A corrupt file is reported through the log facade and otherwise
    /// ignored; the next successful save overwrites it.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("discarding unreadable config: {e}");
                Self::default()
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Range-check every field.
    ///
    /// This is the single validation boundary. Values rejected here
    /// never reach the engines, which is why the engine setters can
    /// stay permissive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !REMINDER_INTERVAL_RANGE.contains(&self.reminder_interval) {
            return Err(ConfigError::InvalidValue {
                key: "reminder_interval".into(),
                message: format!(
                    "must be between {} and {} minutes",
                    REMINDER_INTERVAL_RANGE.start(),
                    REMINDER_INTERVAL_RANGE.end()
                ),
            });
        }
        if !DISTRACTION_THRESHOLD_RANGE.contains(&self.distraction_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "distraction_threshold".into(),
                message: format!(
                    "must be between {} and {} seconds",
                    DISTRACTION_THRESHOLD_RANGE.start(),
                    DISTRACTION_THRESHOLD_RANGE.end()
                ),
            });
        }
        Ok(())
    }

    /// Get a field as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "reminder_interval" => Some(self.reminder_interval.to_string()),
            "sound_enabled" => Some(self.sound_enabled.to_string()),
            "auto_mode" => Some(self.auto_mode.to_string()),
            "distraction_threshold" => Some(self.distraction_threshold.to_string()),
            _ => None,
        }
    }

    /// Parse and assign a field from a string value. Does not validate
    /// ranges or touch the disk; see [`set`](Self::set) for the full
    /// settings-save path.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "reminder_interval" => self.reminder_interval = parse_u32(key, value)?,
            "sound_enabled" => self.sound_enabled = parse_bool(key, value)?,
            "auto_mode" => self.auto_mode = parse_bool(key, value)?,
            "distraction_threshold" => self.distraction_threshold = parse_u32(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Set a field by key, validate the result, and persist it. The
    /// stored config is untouched when anything fails.
    ///
    /// # Errors
    /// Returns an error for an unknown key, an unparsable or
    /// out-of-range value, or a failed write.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        next.apply(key, value)?;
        next.validate()?;
        next.save()?;
        *self = next;
        Ok(())
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as an integer"),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as a boolean"),
    })
}
