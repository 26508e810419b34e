pub mod catalog_config;
pub mod database_config;
pub mod defaults;
pub mod security_config;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

pub use catalog_config::{CatalogConfig, TraversalStrategy};
pub use database_config::DatabaseConfig;
pub use security_config::SecurityConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub app: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "defaults::default_host")]
    pub host: String,
    #[serde(default = "defaults::default_port")]
    pub port: u16,
    #[serde(default = "defaults::default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::default_host(),
            port: defaults::default_port(),
            environment: defaults::default_environment(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_logging_level")]
    pub level: String,
    #[serde(default = "defaults::default_logging_json_format")]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_logging_level(),
            json_format: defaults::default_logging_json_format(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("config/default.toml"))
                .merge(Toml::file("config/development.toml")),
        )
    }

    /// Layers environment overrides on top of `base` and extracts the config.
    pub fn from_figment(base: Figment) -> Result<Self, Box<figment::Error>> {
        let mut config: Self = base
            .merge(section_env("APP_", "app"))
            .merge(section_env("DATABASE_", "database"))
            .merge(section_env("SECURITY_", "security"))
            .merge(section_env("LOGGING_", "logging"))
            .merge(section_env("CATALOG_", "catalog"))
            .extract()
            .map_err(Box::new)?;

        config.security.metrics_admin_token =
            defaults::normalize_optional_string(config.security.metrics_admin_token);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "DATABASE_URL must be set via configuration or environment".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "database.min_connections cannot exceed database.max_connections".to_string(),
            ));
        }

        self.catalog.validate()
    }
}

/// `CATALOG_MAX_DEPTH` -> `catalog.max_depth`.
fn section_env(prefix: &'static str, section: &'static str) -> Env {
    Env::prefixed(prefix).map(move |key| format!("{section}.{key}").into())
}
