use log::{LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use crate::error::LoggingError;

#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "{} {} [{}] {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            );

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

/// Sends `log` records to `<log_dir>/log.txt`.
pub fn init(log_dir: PathBuf, debug: bool) -> Result<(), LoggingError> {
    create_dir_all(&log_dir)?;

    LOGGER
        .set(FileLogger {
            log_file: log_dir.join("log.txt"),
        })
        .map_err(|_| LoggingError::AlreadySet)?;

    let logger = LOGGER.get().ok_or(LoggingError::AlreadySet)?;
    log::set_logger(logger)?;
    set_debug(debug);
    Ok(())
}

pub fn set_debug(debug: bool) {
    log::set_max_level(if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
}
