use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{model::Coordinates, openweather::DEFAULT_BASE_URL, units::TemperatureUnit};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Position used when the user asks for "here".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    pub fn position(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// unit = "fahrenheit"
///
/// [location]
/// enabled = true
/// latitude = 51.5
/// longitude = -0.12
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    #[serde(default)]
    pub unit: TemperatureUnit,

    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub location: LocationConfig,
}

fn default_demo_delay_ms() -> u64 {
    crate::fixtures::DEFAULT_DEMO_DELAY.as_millis() as u64
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            unit: TemperatureUnit::default(),
            demo_delay_ms: default_demo_delay_ms(),
            base_url: default_base_url(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyglass", "skyglass")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Blank values on either side count as absent.
    pub fn resolve_api_key(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .map(|k| k.trim().to_string())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let api_key = api_key.trim().to_string();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.demo_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml("").expect("empty config must parse");

        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.unit, TemperatureUnit::Celsius);
        assert_eq!(cfg.demo_delay(), Duration::from_millis(1000));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(!cfg.location.enabled);
    }

    #[test]
    fn parses_full_file() {
        let cfg = Config::from_toml(
            r#"
            api_key = "FILE_KEY"
            unit = "fahrenheit"
            demo_delay_ms = 0

            [location]
            enabled = true
            latitude = 51.5
            longitude = -0.12
            "#,
        )
        .expect("config must parse");

        assert_eq!(cfg.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(cfg.demo_delay(), Duration::ZERO);
        assert_eq!(cfg.location.position(), Some(Coordinates::new(51.5, -0.12)));
    }

    #[test]
    fn env_key_wins_over_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(cfg.resolve_api_key(Some("ENV_KEY".into())).as_deref(), Some("ENV_KEY"));
        assert_eq!(cfg.resolve_api_key(Some("   ".into())).as_deref(), Some("FILE_KEY"));
        assert_eq!(cfg.resolve_api_key(None).as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_key_is_absent() {
        let mut cfg = Config::default();
        cfg.set_api_key("  ".into());

        assert!(cfg.api_key.is_none());
        assert!(cfg.resolve_api_key(None).is_none());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.unit = TemperatureUnit::Fahrenheit;

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back = Config::from_toml(&text).expect("parse");
        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.unit, TemperatureUnit::Fahrenheit);
    }
}
