//! Server configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, and the `HTTP_HOST` / `HTTP_PORT` environment variables.

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "CALENDAR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "calendar.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from the config file (if present) and the process environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        let builder = Config::builder()
            .add_source(File::new(&path, FileFormat::Toml).required(false))
            .add_source(http_environment());

        Self::from_builder(builder).with_context(|| format!("Failed to load config from {path}"))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .build()?
            .try_deserialize::<ServerConfig>()?;

        anyhow::ensure!(!config.host.trim().is_empty(), "http host is empty");
        Ok(config)
    }

    /// `host:port`, with IPv6 hosts in brackets.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Maps `HTTP_HOST` and `HTTP_PORT` onto `host` and `port`.
fn http_environment() -> Environment {
    Environment::with_prefix("HTTP").try_parsing(true)
}
