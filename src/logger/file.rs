//! Size-rolling file logger.
//!
//! Each record is one line: `<rfc3339 timestamp> <LEVEL> <message>`. When a
//! record would push the file past `max_size`, the current file is renamed to
//! `<filename>.1` (replacing an older backup) and a new file is started.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use super::{Logger, LoggerError, LoggerOptions, LOGGER_VERSION};
use crate::logging::LogLevel;

/// A logger writing to a single file with one backup generation.
#[derive(Debug)]
pub struct FileLogger {
    options: LoggerOptions,
    file: Option<File>,
    bytes_written: u64,
    rollovers: u32,
}

impl FileLogger {
    /// Creates a logger after validating `options`.
    ///
    /// The log file is not created until the first record is written.
    pub fn new(options: LoggerOptions) -> Result<Self, LoggerError> {
        options.validate()?;
        let bytes_written = match fs::metadata(&options.filename) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => {
                return Err(LoggerError::InvalidOption {
                    name: "filename",
                    reason: format!("{} is not a regular file", options.filename.display()),
                })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => 0,
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(
            filename = %options.filename.display(),
            max_size = options.max_size,
            existing = bytes_written,
            "file logger created"
        );
        Ok(Self {
            options,
            file: None,
            bytes_written,
            rollovers: 0,
        })
    }

    /// Size of the current log file as tracked by the logger.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Number of rollovers performed by this instance.
    pub fn rollovers(&self) -> u32 {
        self.rollovers
    }

    /// Path the current file is moved to on rollover.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.options.filename.as_os_str());
        name.push(".1");
        PathBuf::from(name)
    }

    /// Appends a record if `level` is at or above the configured minimum.
    ///
    /// Returns `Ok(false)` when the record was filtered out.
    pub fn log(&mut self, level: LogLevel, message: &str) -> Result<bool, LoggerError> {
        if level == LogLevel::Off || level < self.options.level {
            return Ok(false);
        }

        let line = format!(
            "{} {:<5} {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            message
        );
        let len = line.len() as u64;

        if self.bytes_written > 0 && self.bytes_written + len > self.options.max_size {
            self.rollover()?;
        }

        let file = match self.file.as_mut() {
            Some(file) => file,
            None => self.file.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.options.filename)?,
            ),
        };
        file.write_all(line.as_bytes())?;
        file.flush()?;
        self.bytes_written += len;
        Ok(true)
    }

    pub fn debug(&mut self, message: &str) -> Result<bool, LoggerError> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&mut self, message: &str) -> Result<bool, LoggerError> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&mut self, message: &str) -> Result<bool, LoggerError> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&mut self, message: &str) -> Result<bool, LoggerError> {
        self.log(LogLevel::Error, message)
    }

    fn rollover(&mut self) -> Result<(), LoggerError> {
        // Close the handle before renaming so the move works on every platform.
        self.file = None;

        let backup = self.backup_path();
        if backup.exists() {
            fs::remove_file(&backup)?;
        }
        if self.options.filename.is_file() {
            fs::rename(&self.options.filename, &backup)?;
        }

        tracing::info!(
            filename = %self.options.filename.display(),
            backup = %backup.display(),
            size = self.bytes_written,
            "log file rolled over"
        );
        self.bytes_written = 0;
        self.rollovers += 1;
        Ok(())
    }
}

impl Logger for FileLogger {
    fn version(&self) -> &str {
        LOGGER_VERSION
    }

    fn fields(&self) -> Vec<(String, Value)> {
        vec![
            (
                "filename".to_string(),
                json!(self.options.filename.to_string_lossy()),
            ),
            ("max_size".to_string(), json!(self.options.max_size)),
            ("level".to_string(), json!(self.options.level.as_str())),
            ("bytes_written".to_string(), json!(self.bytes_written)),
            ("rollovers".to_string(), json!(self.rollovers)),
        ]
    }
}
