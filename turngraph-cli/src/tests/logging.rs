//! Unit tests for log file naming and tracing setup.

use chrono::{Local, TimeZone};

use crate::logging::{debate_log_file, init_tracing, CLASSIFY_LOG_FILE};

#[test]
fn debate_log_file_is_timestamped() {
    let at = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
    assert_eq!(debate_log_file(at), "debate_20250307_090501.log");
}

/// **Scenario**: init_tracing creates the log directory and returns the file path.
///
/// Given: a log dir that does not exist yet
/// When: init_tracing is called twice (a subscriber may already be installed)
/// Then: both calls succeed, the directory and the file exist
#[test]
fn init_tracing_creates_log_dir_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("logs");

    let path = init_tracing(&log_dir, CLASSIFY_LOG_FILE, false).unwrap();
    let again = init_tracing(&log_dir, CLASSIFY_LOG_FILE, true).unwrap();

    assert_eq!(path, log_dir.join("run.log"));
    assert_eq!(path, again);
    assert!(path.is_file());
}
