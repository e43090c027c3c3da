//! Integration tests for the file logger, its configuration and the dumper.

use std::fs;

use taglog::dumper::{data_dumper, print_object};
use taglog::logger::{FileLogger, Logger, LoggerError, LoggerOptions, DEFAULT_MAX_SIZE};
use taglog::logging::LogLevel;

// ============================================================================
// Configuration loading
// ============================================================================

#[test]
fn test_load_options_from_toml() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("taglog.toml");
    fs::write(
        &path,
        r#"
            filename = "foo.txt"
            max_size = 2500000
            level = "warn"
        "#,
    )
    .unwrap();

    let options = LoggerOptions::load(&path).expect("Failed to load options");
    assert_eq!(
        options,
        LoggerOptions::new("foo.txt", 2_500_000).with_level(LogLevel::Warn)
    );
}

#[test]
fn test_load_options_defaults_missing_keys() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("taglog.toml");
    fs::write(&path, "filename = \"app.log\"\n").unwrap();

    let options = LoggerOptions::load(&path).unwrap();
    assert_eq!(options.max_size, DEFAULT_MAX_SIZE);
    assert_eq!(options.level, LogLevel::Info);
}

#[test]
fn test_load_rejects_missing_filename() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("taglog.toml");
    fs::write(&path, "max_size = 10\n").unwrap();

    let err = LoggerOptions::load(&path).unwrap_err();
    assert!(matches!(err, LoggerError::Config(_)));
}

#[test]
fn test_load_rejects_zero_max_size() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("taglog.toml");
    fs::write(&path, "filename = \"a.log\"\nmax_size = 0\n").unwrap();

    let err = LoggerOptions::load(&path).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidOption { name: "max_size", .. }));
}

#[test]
fn test_load_missing_file() {
    let err = LoggerOptions::load("does/not/exist.toml").unwrap_err();
    assert_eq!(
        err.to_string(),
        "configuration file not found: does/not/exist.toml"
    );
}

// ============================================================================
// Logger state and dump
// ============================================================================

#[test]
fn test_dump_contains_configured_values_verbatim() {
    let logger = FileLogger::new(LoggerOptions::new("foo.txt", 2_500_000)).unwrap();

    let mut buf = Vec::new();
    print_object(&mut buf, &logger.snapshot(), Some("Logger object contains")).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.starts_with("Logger object contains:\n$VAR1 = {\n"));
    assert!(text.contains("foo.txt"));
    assert!(text.contains("2500000"));
    assert!(text.contains("'level' => 'info'"));
}

#[test]
fn test_dump_reflects_writes_and_rollovers() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut logger = FileLogger::new(LoggerOptions::new(dir.path().join("app.log"), 64)).unwrap();

    for i in 0..5 {
        logger.info(&format!("record number {i}")).unwrap();
    }
    assert!(logger.rollovers() >= 2);

    let dump = data_dumper(&logger.snapshot()).unwrap();
    assert!(dump.contains(&format!("'rollovers' => {}", logger.rollovers())));
    assert!(dump.contains(&format!("'bytes_written' => {}", logger.bytes_written())));

    let current = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(current.contains("record number 4"));
    assert!(logger.backup_path().exists());
}

#[test]
fn test_records_have_timestamp_and_level() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut logger =
        FileLogger::new(LoggerOptions::new(dir.path().join("app.log"), 4096)).unwrap();
    logger.warn("disk almost full").unwrap();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    let line = contents.lines().next().unwrap();
    let (timestamp, rest) = line.split_once(' ').unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert_eq!(rest, "WARN  disk almost full");
}
