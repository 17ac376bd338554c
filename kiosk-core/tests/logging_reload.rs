// The global subscriber can only be installed once per process, so the reload
// behavior gets a test binary of its own.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use kiosk_core::config::LoggingConfig;
use kiosk_core::logging::init_logging;
use tempfile::TempDir;

fn log_contents(dir: &Path) -> String {
    let mut contents = String::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            contents.push_str(&fs::read_to_string(entry.path()).unwrap_or_default());
        }
    }
    contents
}

/// The file writer flushes on a worker thread; wait for `needle` to land.
fn wait_for_line(dir: &Path, needle: &str) -> String {
    let mut contents = String::new();
    for _ in 0..100 {
        contents = log_contents(dir);
        if contents.contains(needle) {
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }
    contents
}

#[test]
fn test_reload_keeps_the_installed_file_writer() {
    let temp_dir = TempDir::new().unwrap();
    let with_file = LoggingConfig {
        level: "info".to_string(),
        file_path: Some(temp_dir.path().join("kiosk.log")),
        format: "text".to_string(),
    };
    init_logging(&with_file, false).unwrap();
    tracing::info!("before-reload");
    assert!(wait_for_line(temp_dir.path(), "before-reload").contains("before-reload"));

    // A second initialization keeps the subscriber and must not silence its file.
    init_logging(&LoggingConfig::default(), true).unwrap();
    tracing::info!("after-reload");

    let contents = wait_for_line(temp_dir.path(), "after-reload");
    assert!(contents.contains("before-reload"), "log file: {:?}", contents);
    assert!(contents.contains("after-reload"), "log file: {:?}", contents);

    // Without the reload flag a second initialization is refused.
    assert!(init_logging(&with_file, false).is_err());
}

