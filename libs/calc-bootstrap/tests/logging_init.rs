#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Installs the global subscriber, so this file holds a single test.

use calc_bootstrap::{LogFormat, LoggingConfig, init_logging};

#[test]
fn file_logging_writes_to_rolling_file() {
    let home = tempfile::tempdir().unwrap();
    let cfg = LoggingConfig {
        level: "info".to_owned(),
        format: LogFormat::Text,
        file: Some("logs/matrix-calc.log".to_owned()),
    };

    temp_env::with_var_unset("RUST_LOG", || {
        let guard = init_logging(&cfg, home.path()).unwrap();
        assert!(guard.is_some());

        tracing::info!(marker = "bootstrap-test", "hello from the logging test");
        drop(guard);

        let second = init_logging(&cfg, home.path());
        assert!(second.is_err(), "a second global subscriber must be refused");
    });

    let entries: Vec<_> = std::fs::read_dir(home.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    let log_file = entries
        .iter()
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("matrix-calc.log"))
        })
        .expect("rolling log file");
    let contents = std::fs::read_to_string(log_file).unwrap();
    assert!(contents.contains("hello from the logging test"));
}
