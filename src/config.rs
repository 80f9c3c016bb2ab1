use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::Level;
use serde::Deserialize;
use thiserror::Error;

pub const SCANNER: &str = "trivy";
pub const CONFIG_DIR: &str = "trivy-webhook";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("trivy webhook plugin expects a webhook endpoint url")]
    MissingWebhookUrl,

    #[error("webhook timeout must be at least one second")]
    ZeroWebhookTimeout,

    #[error("could not read config file")]
    CouldNotRead(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        WebhookConfig {
            url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl WebhookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the wrapped scanner.
///
/// `timeout` and `format` are only handed to the scanner as default flags, so
/// they are kept as the raw strings the scanner expects (e.g. `"30s"`).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub command: String,
    pub timeout: String,
    pub format: Option<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            command: SCANNER.to_string(),
            timeout: "30s".to_string(),
            format: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Level,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig { level: Level::Info }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub webhook: WebhookConfig,
    pub scanner: ScannerConfig,
    pub logger: LoggerConfig,
}

impl Config {
    pub fn load(raw: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
        Self::load(&fs::read_to_string(path)?)
    }

    /// The per-user config file, if one has been created.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
            .filter(|path| path.exists())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook.url.is_empty() {
            return Err(ConfigError::MissingWebhookUrl);
        }

        if self.webhook.timeout_secs == 0 {
            return Err(ConfigError::ZeroWebhookTimeout);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let config = Config::load(
            r#"
            [webhook]
            url = "https://hooks.example.com/trivy"
            timeout_secs = 5

            [scanner]
            command = "/usr/local/bin/trivy"
            timeout = "5m"
            format = "json"

            [logger]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.webhook.url, "https://hooks.example.com/trivy");
        assert_eq!(config.webhook.timeout(), Duration::from_secs(5));
        assert_eq!(config.scanner.command, "/usr/local/bin/trivy");
        assert_eq!(config.scanner.timeout, "5m");
        assert_eq!(config.scanner.format.as_deref(), Some("json"));
        assert_eq!(config.logger.level, Level::Debug);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::load("").unwrap();

        assert_eq!(config.webhook.url, "");
        assert_eq!(config.webhook.timeout(), Duration::from_secs(30));
        assert_eq!(config.scanner.command, "trivy");
        assert_eq!(config.scanner.timeout, "30s");
        assert!(config.scanner.format.is_none());
        assert_eq!(config.logger.level, Level::Info);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::load("[webhook]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load_file(Path::new("/nonexistent/trivy-webhook.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::CouldNotRead(_)));
    }

    #[test]
    fn test_validate_requires_url() {
        let mut config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingWebhookUrl)
        ));

        config.webhook.url = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config::load(
            r#"
            [webhook]
            url = "http://localhost:8080"
            timeout_secs = 0
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroWebhookTimeout)
        ));
    }
}
