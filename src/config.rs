use serde::Deserialize;
use thiserror::Error;

use std::net::SocketAddr;

pub const CONFIG_ENV: &str = "SANJO_TSUBAME_CONFIG";
pub const ADDR_ENV: &str = "SANJO_TSUBAME_ADDR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Could not deserialize config: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid listen address '{0}'")]
    InvalidAddr(String),

    #[error("Route prefix '{0}' must start with '/'")]
    InvalidPrefix(String),
}

/// Server configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Path prefixes the calendar routes are mounted under.
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
}

fn default_addr() -> String {
    "127.0.0.1:7878".to_string()
}

fn default_prefixes() -> Vec<String> {
    vec![
        "/api/sanjo_tsubame_calendar".to_string(),
        "/sanjo_tsubame_calendar".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            prefixes: default_prefixes(),
        }
    }
}

impl ServerConfig {
    pub fn from_config(config: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file named by `SANJO_TSUBAME_CONFIG` if set, otherwise
    /// start from the defaults. `SANJO_TSUBAME_ADDR` overrides the address in
    /// both cases.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Self::from_config(&text)?
            }
            Err(_) => Self::default(),
        };
        if let Ok(addr) = std::env::var(ADDR_ENV) {
            config.addr = addr;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(self.addr.clone()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if let Some(prefix) = self.prefixes.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::InvalidPrefix(prefix.clone()));
        }
        Ok(())
    }
}
