//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_PREFIX};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
    pub cors: CorsSettings,
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory uploaded objects are written to.
    pub root_dir: String,
    /// URL prefix under which `root_dir` is publicly served.
    pub public_base_url: String,
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedSettings {
    pub demo: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Defaults shared by every environment.
    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menu-server")?
            .set_default("database.backend", "memory")?
            .set_default("database.url", "postgres://localhost/menu")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("storage.root_dir", "static/uploads")?
            .set_default("storage.public_base_url", "http://127.0.0.1:8080/uploads")?
            .set_default("storage.prefix", DEFAULT_UPLOAD_PREFIX)?
            .set_default("upload.max_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("logging.level", "info,menu_server=debug")?
            .set_default("logging.format", "pretty")?
            .set_default("cors.allowed_origin", "http://localhost:3000")?
            .set_default("seed.demo", false)
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.env, "test");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.storage.prefix, "menu-items");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.logging.directory.is_none());
        assert!(!config.seed.demo);
        assert!(!config.is_production());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\nbackend = \"postgres\"\nurl = \"postgres://db/menu\"\n\n[seed]\ndemo = true"
        )
        .unwrap();

        let config: AppConfig = AppConfig::builder("production")
            .unwrap()
            .add_source(File::from(file.path()))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.backend, DatabaseBackend::Postgres);
        assert_eq!(config.database.url, "postgres://db/menu");
        assert!(config.seed.demo);
        assert!(config.is_production());
    }
}
