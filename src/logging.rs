//! File logging
//!
//! The terminal belongs to the UI, so logs go to `skyfetch.log` in the data
//! dir. If that file can't be opened the app still starts and logs go nowhere.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_FILE: &str = "skyfetch.log";
pub const LOG_ENV: &str = "SKYFETCH_LOG";

/// Open (append) the log file, creating the data dir first.
pub fn open_log_file(dir: &Path) -> io::Result<File> {
    std::fs::create_dir_all(dir)?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
}

/// Log file writer, or a sink plus the reason the file was unusable.
pub fn log_writer(dir: &Path) -> (BoxMakeWriter, Option<io::Error>) {
    match open_log_file(dir) {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), None),
        Err(e) => (BoxMakeWriter::new(io::sink), Some(e)),
    }
}

/// Install the global subscriber, filtered by `SKYFETCH_LOG` (default `info`).
pub fn init(dir: &Path) {
    let (writer, error) = log_writer(dir);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    if let Some(error) = error {
        tracing::warn!(dir = %dir.display(), %error, "log file unavailable, logging disabled");
    }
}
