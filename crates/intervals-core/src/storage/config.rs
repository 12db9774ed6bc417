//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default session shape (sets, work, rest, lead-in)
//! - Whether cues are played
//! - Ticker period
//!
//! Configuration is stored at `~/.config/intervals/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{TimerConfiguration, DEFAULT_LEAD_IN_SECS};

/// Session shape used when the command line does not override it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDefaults {
    #[serde(default = "default_sets")]
    pub sets: u32,
    #[serde(default = "default_phase_secs")]
    pub work_secs: u32,
    #[serde(default = "default_phase_secs")]
    pub rest_secs: u32,
    #[serde(default = "default_lead_in_secs")]
    pub lead_in_secs: u32,
}

/// Audio cue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Ticker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/intervals/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionDefaults,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
}

// Default functions
fn default_sets() -> u32 {
    1
}
fn default_phase_secs() -> u32 {
    5
}
fn default_lead_in_secs() -> u32 {
    DEFAULT_LEAD_IN_SECS
}
fn default_true() -> bool {
    true
}
fn default_period_ms() -> u64 {
    1000
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            sets: default_sets(),
            work_secs: default_phase_secs(),
            rest_secs: default_phase_secs(),
            lead_in_secs: default_lead_in_secs(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("expected a non-negative integer, got '{value}'")))?,
                serde_json::Value::Object(_) => return Err(unknown()),
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or is out of range. The config is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.sets == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.sets".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.ticker.period_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ticker.period_ms".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// The configured default session.
    pub fn timer_configuration(&self) -> TimerConfiguration {
        TimerConfiguration {
            sets_total: self.session.sets,
            work_secs: self.session.work_secs,
            rest_secs: self.session.rest_secs,
            lead_in_secs: self.session.lead_in_secs,
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.ticker.period_ms)
    }

    /// Load from disk, falling back to defaults (with a warning) on error.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("using default settings: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.sets, 1);
        assert_eq!(parsed.session.lead_in_secs, 5);
        assert!(parsed.audio.enabled);
        assert_eq!(parsed.ticker.period_ms, 1000);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[session]\nsets = 4\nwork_secs = 40\n").unwrap();
        assert_eq!(parsed.session.sets, 4);
        assert_eq!(parsed.session.work_secs, 40);
        assert_eq!(parsed.session.rest_secs, 5);
        assert!(parsed.audio.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("audio.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("session.work_secs").as_deref(), Some("5"));
        assert!(cfg.get("session.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("audio.enabled", "false").unwrap();
        cfg.set("session.sets", "8").unwrap();
        assert!(!cfg.audio.enabled);
        assert_eq!(cfg.session.sets, 8);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("session.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("session", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_negative_and_malformed_numbers() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("session.work_secs", "-5"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.set("audio.enabled", "loud").is_err());
        assert_eq!(cfg.session.work_secs, 5);
    }

    #[test]
    fn set_rejects_zero_sets() {
        let mut cfg = Config::default();
        assert!(cfg.set("session.sets", "0").is_err());
        assert_eq!(cfg.session.sets, 1);
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("session.rest_secs", "15").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.rest_secs, 15);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.session.sets, 1);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn converts_to_timer_configuration() {
        let cfg = Config::default();
        let timer = cfg.timer_configuration();
        assert_eq!(timer, TimerConfiguration::default());
        assert!(timer.validate().is_ok());
        assert_eq!(cfg.tick_period(), Duration::from_secs(1));
    }
}
