//! Error classification types for the walkthrough
//!
//! The custom hierarchy is rooted at [`MyError`] with two leaf variants, `Spam`
//! and `Eggs`. Everything a handler can receive is folded into [`Failure`],
//! which also covers builtin conversion failures and generic positional
//! failures. [`ErrorKind`] gives each failure a human-readable kind name.

use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

use crate::dumper::push_quoted;

/// The kind of a failure, used for handler matching and for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Leaf of the custom hierarchy.
    Spam,
    /// Leaf of the custom hierarchy.
    Eggs,
    /// A string could not be converted to a number.
    Conversion,
    /// A failure built from positional arguments with no finer category.
    Generic,
}

impl ErrorKind {
    /// Returns the human-readable kind name reported by catch-all handlers.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Spam => "SpamError",
            ErrorKind::Eggs => "EggsError",
            ErrorKind::Conversion => "ConversionError",
            ErrorKind::Generic => "GenericError",
        }
    }

    /// Returns true for the leaves of the custom [`MyError`] hierarchy.
    pub fn is_custom(&self) -> bool {
        matches!(self, ErrorKind::Spam | ErrorKind::Eggs)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Root of the user-defined error hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MyError {
    /// Spam error, with an optional message.
    Spam(Option<String>),
    /// Eggs error, with an optional message.
    Eggs(Option<String>),
}

impl MyError {
    /// Creates a `Spam` error carrying a message.
    pub fn spam(message: impl Into<String>) -> Self {
        MyError::Spam(Some(message.into()))
    }

    /// Creates an `Eggs` error carrying a message.
    pub fn eggs(message: impl Into<String>) -> Self {
        MyError::Eggs(Some(message.into()))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MyError::Spam(_) => ErrorKind::Spam,
            MyError::Eggs(_) => ErrorKind::Eggs,
        }
    }

    /// Returns the message, if one was supplied.
    pub fn message(&self) -> Option<&str> {
        match self {
            MyError::Spam(message) | MyError::Eggs(message) => message.as_deref(),
        }
    }
}

impl fmt::Display for MyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or_default())
    }
}

impl std::error::Error for MyError {}

/// A builtin string-to-integer conversion failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot convert '{input}' to an integer: {source}")]
pub struct ConversionError {
    input: String,
    #[source]
    source: ParseIntError,
}

impl ConversionError {
    /// The text that failed to convert.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parses `input` as a base-10 integer, classifying failures as conversion errors.
pub fn parse_int(input: &str) -> Result<i64, ConversionError> {
    input.parse::<i64>().map_err(|source| ConversionError {
        input: input.to_string(),
        source,
    })
}

/// A generic failure constructed from positional arguments.
///
/// Renders like a tuple when more than one argument is present:
/// `GenericError::new(["spam", "eggs"])` displays as `('spam', 'eggs')`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericError {
    args: Vec<String>,
}

impl GenericError {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The original arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The kind name shown when the instance itself is inspected.
    pub fn type_name(&self) -> &'static str {
        ErrorKind::Generic.name()
    }

    /// Renders the argument tuple, e.g. `('spam', 'eggs')`.
    ///
    /// Quotes and backslashes inside an argument are escaped.
    pub fn args_repr(&self) -> String {
        let quoted: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                let mut out = String::with_capacity(arg.len() + 2);
                push_quoted(arg, &mut out);
                out
            })
            .collect();
        match quoted.len() {
            1 => format!("({},)", quoted[0]),
            _ => format!("({})", quoted.join(", ")),
        }
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.args.as_slice() {
            [] => Ok(()),
            [single] => f.write_str(single),
            _ => f.write_str(&self.args_repr()),
        }
    }
}

impl std::error::Error for GenericError {}

/// Any failure a protected region can raise.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Failure {
    #[error(transparent)]
    Custom(#[from] MyError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Generic(#[from] GenericError),
}

impl Failure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Failure::Custom(err) => err.kind(),
            Failure::Conversion(_) => ErrorKind::Conversion,
            Failure::Generic(_) => ErrorKind::Generic,
        }
    }

    /// Returns the custom-hierarchy error, if this is one.
    pub fn as_custom(&self) -> Option<&MyError> {
        match self {
            Failure::Custom(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_my_error_message_roundtrip() {
        let err = MyError::spam("spam error string here!");
        assert_eq!(err.kind(), ErrorKind::Spam);
        assert_eq!(err.message(), Some("spam error string here!"));
        assert_eq!(err.to_string(), "spam error string here!");
    }

    #[test]
    fn test_my_error_without_message_displays_empty() {
        let err = MyError::Eggs(None);
        assert_eq!(err.kind(), ErrorKind::Eggs);
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::Spam.name(), "SpamError");
        assert_eq!(ErrorKind::Eggs.name(), "EggsError");
        assert_eq!(ErrorKind::Conversion.name(), "ConversionError");
        assert_eq!(ErrorKind::Generic.to_string(), "GenericError");
    }

    #[test]
    fn test_is_custom() {
        assert!(ErrorKind::Spam.is_custom());
        assert!(ErrorKind::Eggs.is_custom());
        assert!(!ErrorKind::Conversion.is_custom());
        assert!(!ErrorKind::Generic.is_custom());
    }

    #[test]
    fn test_parse_int_rejects_letters() {
        let err = parse_int("abc").unwrap_err();
        assert_eq!(err.input(), "abc");
        assert!(!err.to_string().is_empty());
        assert_eq!(
            err.to_string(),
            "cannot convert 'abc' to an integer: invalid digit found in string"
        );
    }

    #[test]
    fn test_parse_int_accepts_digits() {
        assert_eq!(parse_int("42").unwrap(), 42);
        assert_eq!(parse_int("-7").unwrap(), -7);
    }

    #[test]
    fn test_generic_error_two_args() {
        let err = GenericError::new(["spam", "eggs"]);
        assert_eq!(err.args(), ["spam".to_string(), "eggs".to_string()]);
        assert_eq!(err.to_string(), "('spam', 'eggs')");
        assert_eq!(err.type_name(), "GenericError");
    }

    #[test]
    fn test_generic_error_single_arg_renders_verbatim() {
        let err = GenericError::new(["My simple exception occurred!"]);
        assert_eq!(err.to_string(), "My simple exception occurred!");
        assert_eq!(err.args_repr(), "('My simple exception occurred!',)");
    }

    #[test]
    fn test_generic_error_escapes_quotes() {
        let err = GenericError::new(["it's", "a\\b"]);
        assert_eq!(err.args_repr(), r"('it\'s', 'a\\b')");
        assert_eq!(err.to_string(), err.args_repr());
    }

    #[test]
    fn test_generic_error_no_args() {
        let err = GenericError::new(Vec::<String>::new());
        assert_eq!(err.to_string(), "");
        assert_eq!(err.args_repr(), "()");
    }

    #[test]
    fn test_failure_kind_and_conversion() {
        let failure: Failure = MyError::eggs("x").into();
        assert_eq!(failure.kind(), ErrorKind::Eggs);
        assert!(failure.as_custom().is_some());

        let failure: Failure = parse_int("abc").unwrap_err().into();
        assert_eq!(failure.kind(), ErrorKind::Conversion);
        assert!(failure.as_custom().is_none());

        let failure: Failure = GenericError::new(["a"]).into();
        assert_eq!(failure.kind(), ErrorKind::Generic);
        assert_eq!(failure.to_string(), "a");
    }
}
