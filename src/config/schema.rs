use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:3000";

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// server:
///   port: 8080
///   client_origin: "http://localhost:3000"
/// storage:
///   path: "/var/lib/clash-cup/league.json"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Port the HTTP API listens on (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin allowed to call the API from a browser (CORS)
    #[serde(default = "default_client_origin")]
    pub client_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            client_origin: DEFAULT_CLIENT_ORIGIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// League data file. Defaults to ~/.config/clash-cup/league.json
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn data_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(crate::store::get_data_path)
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_client_origin() -> String {
    DEFAULT_CLIENT_ORIGIN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.client_origin, "http://localhost:3000");
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            server: ServerConfig {
                port: 9000,
                client_origin: "https://cup.example.com".to_string(),
            },
            storage: StorageConfig {
                path: Some(PathBuf::from("/tmp/league.json")),
            },
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
server:
  port: 9090
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.client_origin, DEFAULT_CLIENT_ORIGIN);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
server:
  prot: 9090
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_storage_path_override() {
        let storage = StorageConfig {
            path: Some(PathBuf::from("/data/league.json")),
        };
        assert_eq!(storage.data_path(), PathBuf::from("/data/league.json"));
    }
}
