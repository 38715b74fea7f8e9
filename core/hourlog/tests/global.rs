//! Process-wide logger lifecycle.
//!
//! Each integration test file runs in its own process, so this file owns the
//! global instance. Everything lives in one test to keep the order fixed.

use hourlog::{Level, LogConfig, Logging};
use tempfile::tempdir;

#[test]
fn global_logger_lifecycle() {
    let temp = tempdir().unwrap();
    let config = LogConfig {
        dir: temp.path().join("logs"),
        level: Level::Warn,
        console: false,
    };

    let installed = hourlog::init(&config).unwrap();
    assert_eq!(installed.writer().base_dir(), config.dir.as_path());

    // A second install is rejected and the first stays in place.
    let again = hourlog::try_init(Logging::from_config(&LogConfig::default()));
    assert!(matches!(again, Err(hourlog::Error::AlreadyInitialized)));
    assert_eq!(hourlog::writer().base_dir(), config.dir.as_path());

    assert_eq!(hourlog::level(), Level::Warn);
    hourlog::info("below threshold");
    hourlog::warn("plain warning");
    hourlog::error!("formatted error {}", 7);

    hourlog::set_level(Level::Debug);
    hourlog::debug!("debug now visible");

    // Lines may straddle an hour boundary, so read every file in order.
    let current = hourlog::writer().current_path().expect("file opened by first line");
    let listed = hourlog::files::list(&config.dir).unwrap();
    assert_eq!(listed.last().map(|f| &f.path), Some(&current));

    let content: String = listed
        .iter()
        .map(|f| std::fs::read_to_string(&f.path).unwrap())
        .collect();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 3, "{content}");
    assert!(lines[0].contains("[WARN]  ") && lines[0].ends_with("--> plain warning"));
    assert!(lines[1].contains("[ERROR] ") && lines[1].ends_with("--> formatted error 7"));
    assert!(lines[2].contains("[DEBUG] ") && lines[2].ends_with("--> debug now visible"));
    assert!(lines.iter().all(|l| l.contains("global.rs:")));
}
