use super::{LogTarget, Logger};
use std::fs;

fn temp_log_dir(tag: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("bayplan-logs-{tag}-{nanos}"))
}

#[test]
fn file_logging_writes_to_configured_dir() {
    let dir = temp_log_dir("write");
    let logger = Logger::new();
    logger.set_log_dir(&dir);

    logger.info("agenda loaded", LogTarget::FileOnly);

    let path = logger.log_path().expect("log file should exist");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("agenda loaded"));
    assert!(contents.contains("INFO"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn disabled_file_logging_creates_no_file() {
    let dir = temp_log_dir("disabled");
    let logger = Logger::new();
    logger.set_log_dir(&dir);
    logger.set_file_logging_enabled(false);

    logger.error("write failed", LogTarget::FileOnly);

    assert!(logger.log_path().is_none());
    assert!(!logger.file_logging_enabled());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn log_dir_is_fixed_after_first_write() {
    let first = temp_log_dir("first");
    let second = temp_log_dir("second");
    let logger = Logger::new();
    logger.set_log_dir(&first);

    logger.warn("stale fetch discarded", LogTarget::FileOnly);
    logger.set_log_dir(&second);
    logger.warn("another", LogTarget::FileOnly);

    let path = logger.log_path().expect("log file should exist");
    assert!(path.starts_with(&first));

    let _ = fs::remove_dir_all(&first);
    let _ = fs::remove_dir_all(&second);
}
