//! Error handling and classification module
//!
//! This module provides the custom error hierarchy, the unified [`Failure`]
//! type, ordered handler dispatch, and completion blocks that run on every
//! exit path of a protected region.

pub mod classification;
pub mod dispatch;
pub mod finally;

// Re-export main types for convenient access
pub use classification::{parse_int, ConversionError, ErrorKind, Failure, GenericError, MyError};
pub use dispatch::{Dispatch, HandledBy, Outcome};
pub use finally::{protect, Finally};
