//! Logger options and how they are loaded.
//!
//! Options come from, in increasing precedence: built-in defaults, an optional
//! TOML file, and `TAGLOG__<KEY>` environment variables
//! (e.g. `TAGLOG__MAX_SIZE=1000`).

use std::io;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogLevel;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "TAGLOG";

/// Rollover threshold used when a configuration file omits `max_size`.
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024;

/// Errors that can occur while configuring or writing with a logger.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// IO error while writing or rolling over the log file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] ConfigError),

    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration file path is not valid UTF-8.
    #[error("invalid configuration path: {0}")]
    InvalidPath(String),

    /// An option was present but unusable.
    #[error("invalid value for option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_SIZE
}

/// Named options accepted by [`super::FileLogger`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggerOptions {
    /// Destination path for log output
    pub filename: PathBuf,
    /// Rollover threshold in bytes
    #[serde(default = "default_max_size")]
    pub max_size: u64,
    /// Minimum level written to the file
    #[serde(default)]
    pub level: LogLevel,
}

impl LoggerOptions {
    pub fn new(filename: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            filename: filename.into(),
            max_size,
            level: LogLevel::default(),
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Checks the options a logger cannot work without.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.filename.as_os_str().is_empty() {
            return Err(LoggerError::InvalidOption {
                name: "filename",
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_size == 0 {
            return Err(LoggerError::InvalidOption {
                name: "max_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Load options from a TOML file, with `TAGLOG__*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or the
    /// resulting options are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoggerError> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| LoggerError::InvalidPath(format!("{:?}", path)))?;

        if !path.exists() {
            return Err(LoggerError::FileNotFound(path_str.to_string()));
        }

        build(Config::builder().add_source(File::with_name(path_str)), ENV_PREFIX)
    }

    /// Apply `TAGLOG__*` environment overrides on top of `defaults`.
    pub fn from_env(defaults: &LoggerOptions) -> Result<Self, LoggerError> {
        with_env_prefix(defaults, ENV_PREFIX)
    }
}

pub(crate) fn with_env_prefix(
    defaults: &LoggerOptions,
    prefix: &str,
) -> Result<LoggerOptions, LoggerError> {
    let filename = defaults
        .filename
        .to_str()
        .ok_or_else(|| LoggerError::InvalidPath(format!("{:?}", defaults.filename)))?;

    let builder = Config::builder()
        .set_default("filename", filename)?
        .set_default("max_size", defaults.max_size)?
        .set_default("level", defaults.level.as_str())?;
    build(builder, prefix)
}

fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    prefix: &str,
) -> Result<LoggerOptions, LoggerError> {
    let config = builder
        .add_source(
            Environment::with_prefix(prefix)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let options: LoggerOptions = config.try_deserialize()?;
    options.validate()?;
    tracing::debug!(
        filename = %options.filename.display(),
        max_size = options.max_size,
        level = options.level.as_str(),
        "logger options loaded"
    );
    Ok(options)
}
