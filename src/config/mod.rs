//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Avatar download configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Avatar service base URL; the player name and size are appended as path segments
    #[serde(default = "default_avatar_base_url")]
    pub base_url: String,

    /// Avatar size in pixels
    #[serde(default = "default_avatar_size")]
    pub size: u32,

    /// Pause between requests, in milliseconds
    #[serde(default = "default_avatar_delay_ms")]
    pub delay_ms: u64,

    /// Timeout in seconds
    #[serde(default = "default_avatar_timeout")]
    pub timeout_seconds: u64,
}

fn default_avatar_base_url() -> String {
    "http://cravatar.eu/helmavatar".to_string()
}

fn default_avatar_size() -> u32 {
    32
}

fn default_avatar_delay_ms() -> u64 {
    100
}

fn default_avatar_timeout() -> u64 {
    30
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: default_avatar_base_url(),
            size: default_avatar_size(),
            delay_ms: default_avatar_delay_ms(),
            timeout_seconds: default_avatar_timeout(),
        }
    }
}

impl AvatarConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Logo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Exact event name -> logo path, checked before the keyword rules
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub avatars: AvatarConfig,

    #[serde(default)]
    pub logos: LogoConfig,
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            avatars: AvatarConfig::default(),
            logos: LogoConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line avatar overrides and re-validate.
    pub fn apply_avatar_overrides(
        &mut self,
        delay: Option<Duration>,
        size: Option<u32>,
    ) -> Result<(), ConfigError> {
        if let Some(delay) = delay {
            self.avatars.delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        }
        if let Some(size) = size {
            self.avatars.size = size;
        }
        self.validate()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.avatars.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Avatar timeout must be greater than 0".to_string(),
            ));
        }

        if self.avatars.size == 0 {
            return Err(ConfigError::ValidationError(
                "Avatar size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.public_dir, PathBuf::from("./public"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.avatars.size, 32);
        assert!(config.logos.overrides.is_empty());
    }

    #[test]
    fn test_avatar_config_default() {
        let avatars = AvatarConfig::default();

        assert_eq!(avatars.base_url, "http://cravatar.eu/helmavatar");
        assert_eq!(avatars.delay(), Duration::from_millis(100));
        assert_eq!(avatars.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_avatar_settings() {
        let mut config = AppConfig::default();
        config.avatars.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.avatars.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_avatar_overrides_are_validated() {
        let mut config = AppConfig::default();
        config
            .apply_avatar_overrides(Some(Duration::from_millis(250)), Some(64))
            .unwrap();
        assert_eq!(config.avatars.delay(), Duration::from_millis(250));
        assert_eq!(config.avatars.size, 64);

        let mut config = AppConfig::default();
        assert!(matches!(
            config.apply_avatar_overrides(None, Some(0)),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
            public_dir = "/srv/site/public"

            [server]
            port = 3000

            [logos.overrides]
            "Minecraft Championship Pride 22" = "/logos/mcc-pride.png"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.public_dir, PathBuf::from("/srv/site/public"));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.avatars.delay_ms, 100);
        assert_eq!(
            config.logos.overrides.get("Minecraft Championship Pride 22"),
            Some(&"/logos/mcc-pride.png".to_string())
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.public_dir, parsed.public_dir);
    }
}
