use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::trainer::TrainerSettings;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_trainer_seconds")]
    pub trainer_seconds: u32,
    #[serde(default = "default_hint_delay_ms")]
    pub hint_delay_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_sound")]
    pub sound: bool,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_trainer_seconds() -> u32 {
    30
}
fn default_hint_delay_ms() -> u64 {
    3000
}
fn default_theme() -> String {
    "cosmos".to_string()
}
fn default_sound() -> bool {
    true
}
fn default_tick_rate_ms() -> u64 {
    100
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trainer_seconds: default_trainer_seconds(),
            hint_delay_ms: default_hint_delay_ms(),
            theme: default_theme(),
            sound: default_sound(),
            tick_rate_ms: default_tick_rate_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyquest")
            .join("config.toml")
    }

    pub fn trainer_settings(&self) -> TrainerSettings {
        TrainerSettings {
            seconds: self.trainer_seconds,
            hint_delay: Duration::from_millis(self.hint_delay_ms),
        }
    }

    /// Tick interval for the event thread, never below 10ms.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.trainer_seconds, 30);
        assert_eq!(config.hint_delay_ms, 3000);
        assert_eq!(config.theme, "cosmos");
        assert!(config.sound);
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
trainer_seconds = 45
sound = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.trainer_seconds, 45);
        assert!(!config.sound);
        assert_eq!(config.theme, "cosmos");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.trainer_seconds, 30);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.theme = "terminal-default".to_string();
        config.hint_delay_ms = 1500;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "terminal-default");
        assert_eq!(loaded.hint_delay_ms, 1500);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "trainer_seconds = \"lots\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_trainer_settings_and_tick_rate() {
        let mut config = Config::default();
        config.hint_delay_ms = 250;
        config.tick_rate_ms = 1;
        assert_eq!(config.trainer_settings().hint_delay, Duration::from_millis(250));
        assert_eq!(config.trainer_settings().seconds, 30);
        assert_eq!(config.tick_rate(), Duration::from_millis(10));
    }
}
