//! Configuration loading and typed config structures for the roster server.
//!
//! Configuration lives in `roster-config.yaml` in the working directory
//! (override the path with `ROSTER_CONFIG`). Every field has a default, so
//! a missing file or a partial file is fine.

use std::path::Path;

use serde::Deserialize;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "roster-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {name}: {message}")]
    Env {
        /// The environment variable.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level roster configuration.
///
/// Mirrors the structure of `roster-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// The institution served.
    #[serde(default)]
    pub school: SchoolConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RosterConfig {
    /// Load configuration from a YAML file at the given path, then apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] on malformed YAML or
    /// [`ConfigError::Env`] if an override is invalid.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load from the configured path, or fall back to defaults (still
    /// honouring environment overrides) when the file does not exist.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`RosterConfig::from_file`] or the
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        let path = Path::new(&path);
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            let mut config = Self::default();
            config.apply_env_overrides(|name| std::env::var(name).ok())?;
            Ok(config)
        }
    }

    /// Override settings with environment variables when set:
    ///
    /// - `ROSTER_HOST` overrides `server.host`
    /// - `ROSTER_PORT` overrides `server.port`
    /// - `ROSTER_DATA_FILE` overrides `storage.data_file`
    ///
    /// `lookup` returns the value of a variable, if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `ROSTER_PORT` is not a valid port.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("ROSTER_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("ROSTER_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::Env {
                name: "ROSTER_PORT",
                message: format!("{val:?}: {e}"),
            })?;
        }
        if let Some(val) = lookup("ROSTER_DATA_FILE") {
            self.storage.data_file = val;
        }
        Ok(())
    }
}

/// Institution settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchoolConfig {
    /// Display name of the institution.
    #[serde(default = "default_school_name")]
    pub name: String,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            name: default_school_name(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON roster file.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_school_name() -> String {
    String::from("BCIT")
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

fn default_data_file() -> String {
    String::from("data/school.json")
}

fn default_log_level() -> String {
    String::from("info")
}
