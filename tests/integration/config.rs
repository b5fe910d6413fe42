use std::fs;

use bayplan::core::context::AppContext;
use bayplan::core::types::ViewMode;

use crate::common::{make_temp_dir, write_config};

#[test]
fn context_wires_config_logger_and_caches() {
    let dir = make_temp_dir("ctx");
    let config = write_config(&dir, false);

    let ctx = AppContext::new_with_paths(config, dir.join("logs")).unwrap();
    assert_eq!(ctx.config.default_view(), ViewMode::Month);
    assert_eq!(ctx.config.max_events_per_cell(), 2);
    assert!(!ctx.logger.file_logging_enabled());
    assert!(ctx.cache.is_empty());
    assert!(ctx.lookups.all_bays().is_empty());
}

#[test]
fn context_fails_on_a_missing_config_file() {
    let dir = make_temp_dir("ctx-missing");
    let err = AppContext::new_with_paths(dir.join("absent.json"), dir.join("logs")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn empty_config_file_falls_back_to_defaults() {
    let dir = make_temp_dir("ctx-defaults");
    let path = dir.join("config.json");
    fs::write(&path, "{}").unwrap();

    let ctx = AppContext::new_with_paths(path, dir.join("logs")).unwrap();
    assert_eq!(ctx.config.api_base_url(), "http://localhost:8090");
    assert_eq!(ctx.config.max_events_per_cell(), 3);
    assert_eq!(ctx.config.occupancy_refresh_secs(), 60);
    assert!(ctx.config.file_logging_enabled());
}
