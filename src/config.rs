//! Service configuration: dataset location, listener address and query defaults.
//!
//! Loaded from an optional TOML file (default `<config_dir>/surfsup/config.toml`),
//! then overridden by command-line flags. A missing file is not an error; the
//! built-in defaults serve the bundled Hawaii dataset on `127.0.0.1:5000`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "Resources/hawaii.sqlite";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot expand path {0:?}")]
    Expand(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite file holding the `station` and `measurement` tables. `~` is expanded.
    pub db_path: String,
    pub gateway: GatewayConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Closing bound for `/api/v1.0/<start>`. When unset the latest date
    /// present in the dataset is used.
    pub default_end_date: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            gateway: GatewayConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "surfsup")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// An explicitly given path must exist; the default path may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Database path with `~` and environment variables expanded.
    pub fn resolved_db_path(&self) -> Result<PathBuf, ConfigError> {
        shellexpand::full(&self.db_path)
            .map(|expanded| PathBuf::from(expanded.as_ref()))
            .map_err(|_| ConfigError::Expand(self.db_path.clone()))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.gateway.host, self.gateway.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::Invalid("db_path must not be empty".into()));
        }
        if self.gateway.host.trim().is_empty() {
            return Err(ConfigError::Invalid("gateway.host must not be empty".into()));
        }
        if self.gateway.port == 0 {
            return Err(ConfigError::Invalid("gateway.port must be non-zero".into()));
        }
        Ok(())
    }
}
