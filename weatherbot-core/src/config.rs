use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable overriding [`Config::telegram_token`].
pub const TELEGRAM_TOKEN_ENV: &str = "WEATHERBOT_TELEGRAM_TOKEN";
/// Environment variable overriding [`Config::yandex_api_key`].
pub const YANDEX_KEY_ENV: &str = "WEATHERBOT_YANDEX_KEY";

/// Yandex Weather forecast endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub base_url: String,
    /// Number of days requested per query.
    pub days: u8,
    pub lang: String,
    pub timeout_secs: u64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.yandex.ru".to_string(),
            days: 7,
            lang: "ru_RU".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Nominatim geocoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    pub base_url: String,
    /// Value of `accept-language`.
    pub language: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            language: "ru".to_string(),
            user_agent: "TelegramWeatherBot/1.0".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    pub base_url: String,
    /// Long-polling timeout passed to `getUpdates`.
    pub poll_timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// telegram_token = "..."
/// yandex_api_key = "..."
///
/// [forecast]
/// days = 7
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub telegram_token: Option<String>,
    pub yandex_api_key: Option<String>,

    #[serde(default)]
    pub forecast: ForecastSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
}

impl Config {
    /// Load config from the platform config directory, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace credentials with non-empty values returned by `lookup` for
    /// [`TELEGRAM_TOKEN_ENV`] and [`YANDEX_KEY_ENV`].
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());

        if let Some(token) = non_empty(TELEGRAM_TOKEN_ENV) {
            self.telegram_token = Some(token);
        }
        if let Some(key) = non_empty(YANDEX_KEY_ENV) {
            self.yandex_api_key = Some(key);
        }
    }

    pub fn telegram_token(&self) -> Result<&str> {
        self.telegram_token.as_deref().ok_or_else(|| {
            anyhow!(
                "No Telegram bot token configured.\n\
                 Hint: run `weatherbot configure` or set {TELEGRAM_TOKEN_ENV}."
            )
        })
    }

    pub fn yandex_api_key(&self) -> Result<&str> {
        self.yandex_api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No Yandex Weather API key configured.\n\
                 Hint: run `weatherbot configure` or set {YANDEX_KEY_ENV}."
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_produce_hints() {
        let cfg = Config::default();

        let err = cfg.telegram_token().unwrap_err();
        assert!(err.to_string().contains("No Telegram bot token configured"));
        assert!(err.to_string().contains(TELEGRAM_TOKEN_ENV));

        let err = cfg.yandex_api_key().unwrap_err();
        assert!(err.to_string().contains("Hint: run `weatherbot configure`"));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            telegram_token = "TG"

            [forecast]
            days = 3
            "#,
        )
        .unwrap();

        assert_eq!(cfg.telegram_token().unwrap(), "TG");
        assert!(cfg.yandex_api_key.is_none());
        assert_eq!(cfg.forecast.days, 3);
        assert_eq!(cfg.forecast.lang, "ru_RU");
        assert_eq!(cfg.geocoder, GeocoderSettings::default());
        assert_eq!(cfg.telegram.poll_timeout_secs, 30);
    }

    #[test]
    fn toml_roundtrip_keeps_settings() {
        let mut cfg = Config::default();
        cfg.yandex_api_key = Some("KEY".into());
        cfg.geocoder.language = "en".into();

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn overrides_replace_credentials() {
        let mut cfg = Config::default();
        cfg.telegram_token = Some("FILE".into());

        cfg.apply_overrides(|name| match name {
            TELEGRAM_TOKEN_ENV => Some("ENV".into()),
            YANDEX_KEY_ENV => Some("  ".into()),
            _ => None,
        });

        assert_eq!(cfg.telegram_token.as_deref(), Some("ENV"));
        assert!(cfg.yandex_api_key.is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("weatherbot-test-does-not-exist/config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
