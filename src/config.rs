//! Configuration management for Bookcafe server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SeedConfig {
    /// Write the demo catalog when the books collection is empty
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with prefix BOOKCAFE_ (e.g. BOOKCAFE_SERVER__PORT)
            .add_source(
                Environment::with_prefix("BOOKCAFE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("storage.data_dir", env::var("DATA_DIR").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl StorageConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            retry_attempts: 3,
            retry_delay_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let storage = StorageConfig::default();
        assert_eq!(storage.retry_attempts, 3);
        assert_eq!(storage.retry_delay(), Duration::from_millis(100));
        assert_eq!(storage.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_partial_config_uses_section_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("server.host", "127.0.0.1")
            .unwrap()
            .set_override("server.port", 8081)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.storage.retry_attempts, 3);
        assert!(config.seed.enabled);
    }

    #[test]
    fn test_data_dir_override_alone() {
        let config: AppConfig = Config::builder()
            .set_override("storage.data_dir", "/tmp/bookcafe")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/bookcafe"));
        assert_eq!(config.storage.retry_attempts, 3);
        assert_eq!(config.storage.retry_delay_ms, 100);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_port_override_alone() {
        let config: AppConfig = Config::builder()
            .set_override("server.port", "8080")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
