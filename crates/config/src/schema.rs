use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const CURRENT_CONFIG_VERSION: &str = "v1";

fn default_config_version() -> String {
    CURRENT_CONFIG_VERSION.to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
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

#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL; the sqlite file in the asset directory when unset.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_config_version")]
    pub config_version: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default = "default_log_level", alias = "logLevel")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Parses a raw config file, falling back to defaults when it is invalid.
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str::<Config>(raw) {
            Ok(config) => config.normalized(),
            Err(err) => {
                tracing::warn!("Invalid config file, using defaults: {}", err);
                Config::default()
            }
        }
    }

    pub fn normalized(mut self) -> Self {
        self.config_version = CURRENT_CONFIG_VERSION.to_string();
        if self.server.host.trim().is_empty() {
            self.server.host = default_host();
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
        self.database.url = self
            .database
            .url
            .take()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }

    /// Applies `HOST`, `PORT` and `DATABASE_URL` on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("HOST")
            && !host.trim().is_empty()
        {
            self.server.host = host.trim().to_string();
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(err) => tracing::warn!("Ignoring invalid PORT '{}': {}", port, err),
            }
        }
        if let Ok(url) = std::env::var("DATABASE_URL")
            && !url.trim().is_empty()
        {
            self.database.url = Some(url.trim().to_string());
        }
        self
    }
}
