use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*};

use crate::{config::Config, error::Error};

/// Logs to stdout and appends to `<log_dir>/app.log`.
pub fn init(config: &Config) -> Result<(), Error> {
    let file = open_log_file(&config.log_dir)?;

    tracing_subscriber::registry()
        .with(config.log_level)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();

    warn_on_missing_token(config);

    Ok(())
}

/// Opens `<dir>/app.log` for appending, creating `dir` if needed.
pub fn open_log_file(dir: &Path) -> Result<File, Error> {
    fs::create_dir_all(dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("app.log"))?;

    Ok(file)
}

/// Returns whether a warning was logged.
pub fn warn_on_missing_token(config: &Config) -> bool {
    if config.mapbox_access_token.is_some() {
        return false;
    }

    tracing::warn!("MAPBOX_ACCESS_TOKEN environment variable is not set");
    true
}

#[test]
fn log_file_is_created_and_appended() {
    use std::io::Write;

    let dir = std::env::temp_dir()
        .join(format!("stopover-logging-{}", std::process::id()))
        .join("nested");
    let _ = fs::remove_dir_all(&dir);

    let mut file = open_log_file(&dir).unwrap();
    writeln!(file, "first").unwrap();
    drop(file);

    let mut file = open_log_file(&dir).unwrap();
    writeln!(file, "second").unwrap();
    drop(file);

    let contents = fs::read_to_string(dir.join("app.log")).unwrap();
    assert_eq!(contents, "first\nsecond\n");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn log_file_under_a_regular_file_fails() {
    let blocker = std::env::temp_dir().join(format!("stopover-blocker-{}", std::process::id()));
    fs::write(&blocker, "").unwrap();

    let err = open_log_file(&blocker.join("logs")).unwrap_err();
    assert_eq!(err.code, 6);

    fs::remove_file(&blocker).unwrap();
}

#[test]
fn warns_only_without_token() {
    let mut config = Config::default();
    assert!(warn_on_missing_token(&config));

    config.mapbox_access_token = Some("pk.test".into());
    assert!(!warn_on_missing_token(&config));
}
