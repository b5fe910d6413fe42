use std::fs;

use crate::common::{make_temp_dir, run_board, write_config, write_seed};

#[test]
fn board_renders_schedule_and_diagram_from_seed() {
    let dir = make_temp_dir("board");
    let config = write_config(&dir, false);
    let seed = write_seed(&dir);
    let logs = dir.join("logs");

    let output = run_board(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--seed",
            seed.to_str().unwrap(),
            "--logs",
            logs.to_str().unwrap(),
        ],
    );

    assert!(
        output.status.success(),
        "board run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BOOKINGS (MONTH)"), "stdout was: {stdout}");
    assert!(stdout.contains("BAY DIAGRAM"));
    assert!(stdout.contains("occupied"));
}

#[test]
fn board_runs_without_a_seed() {
    let dir = make_temp_dir("noseed");
    let config = write_config(&dir, false);
    let logs = dir.join("logs");

    let output = run_board(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--logs",
            logs.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BOOKINGS (MONTH)"));
}

#[test]
fn missing_config_fails_with_context() {
    let dir = make_temp_dir("nocfg");
    let output = run_board(&dir, &["--config", "does-not-exist.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("loading config from"),
        "stderr was: {stderr}"
    );
}

#[test]
fn malformed_seed_fails_with_context() {
    let dir = make_temp_dir("badseed");
    let config = write_config(&dir, false);
    let seed = dir.join("seed.json");
    fs::write(&seed, "{ not json").unwrap();

    let output = run_board(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--seed",
            seed.to_str().unwrap(),
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading seed from"), "stderr was: {stderr}");
}

#[test]
fn unknown_flag_is_rejected() {
    let dir = make_temp_dir("flags");
    let output = run_board(&dir, &["--bogus"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument"), "stderr was: {stderr}");
}

#[test]
fn missing_flag_value_is_rejected() {
    let dir = make_temp_dir("flags");
    let output = run_board(&dir, &["--seed"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Missing value for --seed"),
        "stderr was: {stderr}"
    );
}

#[test]
fn file_logging_records_the_seed_load() {
    let dir = make_temp_dir("logging");
    let config = write_config(&dir, true);
    let seed = write_seed(&dir);
    let logs = dir.join("logs");

    let output = run_board(
        &dir,
        &[
            "--config",
            config.to_str().unwrap(),
            "--seed",
            seed.to_str().unwrap(),
            "--logs",
            logs.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());

    let mut entries = fs::read_dir(&logs)
        .expect("logs dir should exist")
        .filter_map(|e| e.ok())
        .map(|e| e.path());
    let log_file = entries.next().expect("a log file should be written");
    let contents = fs::read_to_string(log_file).unwrap();
    assert!(contents.contains("Seeded 1 booking(s)"), "log was: {contents}");
}
