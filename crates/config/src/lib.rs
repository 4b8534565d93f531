use std::path::Path;

use thiserror::Error;

mod schema;

pub use schema::{CURRENT_CONFIG_VERSION, Config, DatabaseConfig, ServerConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Will always return config, falling back to defaults on missing/invalid files.
pub fn load_config_from_file(config_path: &Path) -> Config {
    match std::fs::read_to_string(config_path) {
        Ok(raw_config) => Config::from_raw(&raw_config),
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                tracing::info!("No config file found at {}, using defaults", config_path.display());
            } else {
                tracing::warn!("Failed to read config file: {}", err);
            }
            Config::default()
        }
    }
}

pub fn save_config_to_file(config: &Config, config_path: &Path) -> Result<(), ConfigError> {
    let normalized = config.clone().normalized();
    if normalized.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }
    let raw_config = serde_json::to_string_pretty(&normalized)?;
    std::fs::write(config_path, raw_config)?;
    Ok(())
}

/// Config from `<asset_dir>/config.json` with environment overrides applied.
pub fn load() -> Result<Config, ConfigError> {
    let path = utils::assets::config_path()?;
    Ok(load_config_from_file(&path).with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_preserves_values() {
        let root = test_support::temp_root("config");
        let path = root.join("config.json");

        let mut config = Config::default();
        config.server.port = 4321;
        config.database.url = Some("sqlite::memory:".to_string());
        save_config_to_file(&config, &path).unwrap();

        let loaded = load_config_from_file(&path);
        assert_eq!(loaded.server.port, 4321);
        assert_eq!(loaded.database.url.as_deref(), Some("sqlite::memory:"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = test_support::temp_root("config-missing");
        assert_eq!(load_config_from_file(&root.join("absent.json")), Config::default());
    }

    #[test]
    fn zero_port_is_rejected_on_save() {
        let root = test_support::temp_root("config-invalid");
        let mut config = Config::default();
        config.server.port = 0;
        let err = save_config_to_file(&config, &root.join("config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
