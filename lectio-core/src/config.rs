//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/lectio/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/lectio/` (~/.config/lectio/)
//! - Data: `$XDG_DATA_HOME/lectio/` (~/.local/share/lectio/)
//! - State/Logs: `$XDG_STATE_HOME/lectio/` (~/.local/state/lectio/)

use crate::error::{Error, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Entry store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Entry store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Seed sample entries when the store is opened empty
    #[serde(default = "default_seed_when_empty")]
    pub seed_when_empty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_when_empty: default_seed_when_empty(),
        }
    }
}

fn default_seed_when_empty() -> bool {
    true
}

/// Analytics configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalyticsConfig {
    /// Fixed UTC offset (minutes) used to cut timestamps into calendar days.
    /// Zero means UTC. The process timezone is never consulted.
    #[serde(default)]
    pub day_offset_minutes: i32,
}

impl AnalyticsConfig {
    /// The day boundary offset as a chrono offset.
    pub fn day_offset(&self) -> Result<FixedOffset> {
        if self.day_offset_minutes.abs() >= 24 * 60 {
            return Err(Error::Config(format!(
                "analytics.day_offset_minutes must be within ±1439, got {}",
                self.day_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.day_offset_minutes * 60).ok_or_else(|| {
            Error::Config(format!(
                "analytics.day_offset_minutes is not a valid offset: {}",
                self.day_offset_minutes
            ))
        })
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(Error::Config(format!(
                "server.port must be 1024 or above, got {}",
                self.server.port
            )));
        }
        if self.server.host.trim().is_empty() {
            return Err(Error::Config("server.host must not be empty".to_string()));
        }
        self.analytics.day_offset()?;
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/lectio/config.toml` (~/.config/lectio/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("lectio").join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    ///
    /// `$XDG_DATA_HOME/lectio/` (~/.local/share/lectio/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("lectio")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/lectio/` (~/.local/state/lectio/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("lectio")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/lectio/entries.db` (~/.local/share/lectio/entries.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("entries.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(config.store.seed_when_empty);
        assert_eq!(config.analytics.day_offset_minutes, 0);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
port = 9090

[store]
seed_when_empty = false

[analytics]
day_offset_minutes = -300

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.store.seed_when_empty);
        assert_eq!(
            config.analytics.day_offset().unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_privileged_port_rejected() {
        let config: Config = toml::from_str("[server]\nport = 80\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_day_offset_out_of_range() {
        let analytics = AnalyticsConfig {
            day_offset_minutes: 24 * 60,
        };
        assert!(analytics.day_offset().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.max_files, 5);
    }
}
