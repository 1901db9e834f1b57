use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "SOLAR_SIM_CONFIG";
pub const PORT_ENV: &str = "SOLAR_SIM_PORT";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

fn default_port() -> u16 { 8080 }
fn default_log_json() -> bool { false }

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid SOLAR_SIM_PORT value '{0}'")]
    Port(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default = "default_log_json")]
    pub log_json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// JSON file mirroring the loaded fleet; in-memory only when absent
    pub path: Option<String>,
}

impl Config {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Loads from `SOLAR_SIM_CONFIG` (or `config.json`) and applies
    /// `SOLAR_SIM_PORT` on top.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(&path)?;
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.server.port = port.parse().map_err(|_| ConfigError::Port(port))?;
        }
        Ok(config)
    }
}
