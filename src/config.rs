//! Configuration module
//!
//! `AppConfig` is read from a TOML file, by default
//! `~/.config/fleet-service/config.toml`. Every section and key is optional.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! backend = "sqlite"        # or "memory"
//! url = "sqlite://./fleet.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [pagination]
//! default_page_size = 10
//! max_page_size = 100
//!
//! [api]
//! public_base_url = "https://fleet.example.com"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;
use crate::shared::pagination::{PageLimits, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Env var pointing at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "FLEET_CONFIG";
/// Env var overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// Non-persistent store, handy for demos
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: DatabaseConfig::default().url,
        }
    }
}

impl DatabaseSettings {
    pub fn connection(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `fleet_service=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    /// Capped at 100 whatever the file says
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    pub fn limits(&self) -> PageLimits {
        PageLimits::new(self.default_page_size, self.max_page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin used for every generated link
    pub public_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply `DATABASE_URL` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.database.url = url;
            }
        }
        self
    }
}

/// `$FLEET_CONFIG`, else `~/.config/fleet-service/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleet-service")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.backend, StorageBackend::Sqlite);
        assert_eq!(cfg.pagination.limits().default_page_size(), 10);
        assert_eq!(cfg.api.public_base_url, "http://localhost:8080");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = AppConfig::parse(
            r#"
            [server]
            port = 9090

            [database]
            backend = "memory"

            [pagination]
            max_page_size = 500
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.backend, StorageBackend::Memory);
        assert_eq!(cfg.pagination.limits().max_page_size(), 100);
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(AppConfig::parse("[database]\nbackend = \"postgres\"").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("fleet-service-missing-config.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.shutdown_timeout, 30);
    }

    #[test]
    fn broken_file_reports_its_path() {
        let path = std::env::temp_dir().join(format!("fleet-service-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("fleet-service-"));
    }
}
