//! taglog - error-classification walkthrough and a small file logger
//!
//! The library backs two binaries: `exceptions_ex`, which walks through
//! handler matching over a custom error hierarchy, and `logger_test`, which
//! builds a configured [`logger::FileLogger`] and dumps its state.

pub mod dumper;
pub mod error;
pub mod logger;
pub mod logging;
pub mod scenarios;
