use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8765;

/// Names the JSON file `from_env` loads before applying overrides.
pub const CONFIG_ENV: &str = "FERRITE_CONFIG";

/// Where the server listens. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { host: DEFAULT_HOST.to_owned(), port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Deserializes a `ServerConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<ServerConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Replaces host and/or port; `port` must parse as a `u16`.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<String>,
    ) -> Result<ServerConfig, ServerError> {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("PORT must be 0-65535, got '{port}'")))?;
        }
        Ok(self)
    }

    /// Defaults, then the `FERRITE_CONFIG` file if set, then `HOST`/`PORT`.
    pub fn from_env() -> Result<ServerConfig, ServerError> {
        let base = match env::var(CONFIG_ENV) {
            Ok(path) => ServerConfig::load_json(&path)
                .map_err(|e| ServerError::Config(format!("{path}: {e}")))?,
            Err(_) => ServerConfig::default(),
        };
        base.with_overrides(env::var("HOST").ok(), env::var("PORT").ok())
    }
}
