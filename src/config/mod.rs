mod schema;
pub mod init;

pub use schema::{Config, ServerConfig, StorageConfig, DEFAULT_CLIENT_ORIGIN, DEFAULT_PORT};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Environment variables that override config file values
pub const ENV_PORT: &str = "PORT";
pub const ENV_CLIENT_ORIGIN: &str = "CLIENT_ORIGIN";
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";

/// Get the config directory path (~/.config/clash-cup/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("clash-cup")
}

/// Get the default config file path (~/.config/clash-cup/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/clash-cup/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error; defaults are used instead.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        info!(
            "No config file at {}, using defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

impl Config {
    /// Apply PORT, CLIENT_ORIGIN and DATABASE_PATH from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(port) = value(ENV_PORT) {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid {} value '{}'", ENV_PORT, port))?;
            info!("{} overrides server port: {}", ENV_PORT, self.server.port);
        }

        if let Some(origin) = value(ENV_CLIENT_ORIGIN) {
            info!("{} overrides client origin: {}", ENV_CLIENT_ORIGIN, origin);
            self.server.client_origin = origin;
        }

        if let Some(path) = value(ENV_DATABASE_PATH) {
            info!("{} overrides storage path: {}", ENV_DATABASE_PATH, path);
            self.storage.path = Some(PathBuf::from(path));
        }

        Ok(())
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push("server.port: must be between 1 and 65535".to_string());
    }

    let origin = config.server.client_origin.trim();
    if origin.is_empty() {
        errors.push("server.client_origin: must not be empty".to_string());
    } else if HeaderValue::from_str(origin).is_err() {
        errors.push(format!(
            "server.client_origin: '{}' is not a valid origin",
            origin
        ));
    }

    if let Some(ref path) = config.storage.path {
        if path.as_os_str().is_empty() {
            errors.push("storage.path: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
