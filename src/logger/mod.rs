//! Logger collaborator.
//!
//! [`Logger`] is the interface the smoke test relies on: a version string and
//! inspectable field state. [`FileLogger`] is the concrete implementation
//! configured through [`LoggerOptions`].

pub mod file;
pub mod options;

use serde_json::{Map, Value};

pub use file::FileLogger;
pub use options::{LoggerError, LoggerOptions, DEFAULT_MAX_SIZE, ENV_PREFIX};

/// Version reported by loggers in this crate.
pub const LOGGER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A logger that can report its version and current field values.
pub trait Logger {
    fn version(&self) -> &str;

    /// Field name/value pairs in declaration order.
    fn fields(&self) -> Vec<(String, Value)>;

    /// The fields as a single object, suitable for [`crate::dumper::data_dumper`].
    fn snapshot(&self) -> Value {
        Value::Object(self.fields().into_iter().collect::<Map<String, Value>>())
    }
}
