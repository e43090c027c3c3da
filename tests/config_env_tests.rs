//! Environment overrides layered over a TOML configuration file.
//!
//! Kept in its own test binary so the `TAGLOG__*` variables set here are not
//! visible to the other configuration tests.

use std::fs;
use std::path::PathBuf;

use taglog::logger::{LoggerError, LoggerOptions};
use taglog::logging::LogLevel;

#[test]
fn test_env_overrides_toml_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("taglog.toml");
    fs::write(
        &path,
        r#"
            filename = "foo.txt"
            max_size = 2500000
            level = "info"
        "#,
    )
    .unwrap();

    std::env::set_var("TAGLOG__MAX_SIZE", "4096");
    std::env::set_var("TAGLOG__LEVEL", "error");
    let options = LoggerOptions::load(&path).expect("Failed to load options");

    // Keys without an override keep the file's value.
    assert_eq!(options.filename, PathBuf::from("foo.txt"));
    assert_eq!(options.max_size, 4096);
    assert_eq!(options.level, LogLevel::Error);

    std::env::set_var("TAGLOG__MAX_SIZE", "0");
    let err = LoggerOptions::load(&path).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidOption { name: "max_size", .. }));

    std::env::remove_var("TAGLOG__MAX_SIZE");
    std::env::remove_var("TAGLOG__LEVEL");
    let options = LoggerOptions::load(&path).unwrap();
    assert_eq!(options.max_size, 2_500_000);
    assert_eq!(options.level, LogLevel::Info);
}
