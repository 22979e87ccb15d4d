//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use recyclehub_core::services::ActorResolution;
use thiserror::Error;

#[cfg(feature = "database")]
use recyclehub_infra::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid ACTOR_RESOLUTION: {0} (expected 'token' or 'client')")]
    ActorResolution(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "database")]
    pub database: Option<DatabaseConfig>,
    /// Run pending migrations before serving.
    pub auto_migrate: bool,
    pub upload_dir: PathBuf,
    pub actor_resolution: ActorResolution,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        #[cfg(feature = "database")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 100),
            min_connections: parsed("DB_MIN_CONNECTIONS", 10),
        });

        let actor_resolution = match env::var("ACTOR_RESOLUTION") {
            Ok(value) => value.parse().map_err(ConfigError::ActorResolution)?,
            Err(_) => ActorResolution::default(),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            #[cfg(feature = "database")]
            database,
            auto_migrate: flag("DATABASE_AUTO_MIGRATE", true),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            actor_resolution,
        })
    }
}
