use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::model::Gender;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// City search tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub language: String,
    pub country_code: String,
    /// Result count cap sent to the geocoder.
    pub count: u32,
    pub debounce_ms: u64,
    pub min_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: "ko".to_string(),
            country_code: "KR".to_string(),
            count: 8,
            debounce_ms: 250,
            min_query_chars: 2,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// IANA zone the daily dates are aligned to.
    pub timezone: String,
    pub forecast_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Seoul".to_string(),
            forecast_days: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_gender = "male"
///
/// [search]
/// country_code = "KR"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_gender: Gender,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
    pub search: SearchConfig,
    pub forecast: ForecastConfig,
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_gender: Gender::default(),
            log_level: "warn".to_string(),
            search: SearchConfig::default(),
            forecast: ForecastConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
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
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
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
        let dirs = ProjectDirs::from("dev", "tomorrow-outfit", "outfit-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.search.min_query_chars == 0 {
            return Err(anyhow!("search.min_query_chars must be at least 1"));
        }
        if self.search.count == 0 {
            return Err(anyhow!("search.count must be at least 1"));
        }
        // Tomorrow lives at day offset 1.
        if self.forecast.forecast_days < 2 {
            return Err(anyhow!(
                "forecast.forecast_days must be at least 2 to include tomorrow (got {})",
                self.forecast.forecast_days
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = Config::from_toml("").expect("empty config must parse");

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.default_gender, Gender::Female);
        assert_eq!(cfg.search.count, 8);
        assert_eq!(cfg.search.debounce(), Duration::from_millis(250));
        assert_eq!(cfg.forecast.timezone, "Asia/Seoul");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            default_gender = "male"

            [search]
            country_code = "JP"
            "#,
        )
        .expect("partial config must parse");

        assert_eq!(cfg.default_gender, Gender::Male);
        assert_eq!(cfg.search.country_code, "JP");
        assert_eq!(cfg.search.language, "ko");
        assert_eq!(cfg.http.forecast_url, FORECAST_URL);
    }

    #[test]
    fn rejects_forecast_window_without_tomorrow() {
        let err = Config::from_toml("[forecast]\nforecast_days = 1\n").unwrap_err();
        assert!(err.to_string().contains("forecast_days"));
    }

    #[test]
    fn rejects_unknown_gender() {
        assert!(Config::from_toml("default_gender = \"robot\"").is_err());
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let cfg = Config {
            default_gender: Gender::Male,
            search: SearchConfig { debounce_ms: 400, ..SearchConfig::default() },
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back = Config::from_toml(&text).expect("parse");
        assert_eq!(back, cfg);
    }
}
