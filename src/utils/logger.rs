//! Logger utility for application-wide logging
//!
//! This module provides the backend behind the `log` crate macros. Every
//! record goes to stderr, and optionally to a log file. Stdout is left
//! untouched because it carries the program's result.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

/// Custom logger implementation
pub struct Logger {
    /// Optional file handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level that is emitted
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to a file the log is appended to, if any
    /// * `level` - Most verbose level to emit
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be opened
    pub fn new(log_file: Option<&str>, level: LevelFilter) -> io::Result<Self> {
        let file = match log_file {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(Path::new(path))?),
            None => None,
        };

        Ok(Logger {
            file: Mutex::new(file),
            level,
        })
    }

    /// Writes a formatted line to stderr and the log file
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        eprintln!("{}", message);

        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                writeln!(file, "{}", message)?;
                file.flush()?;
            }
        }
        Ok(())
    }

    /// Static method to initialize the global logger
    ///
    /// Only the first call installs a logger; later calls leave the
    /// existing one in place.
    pub fn init_global_logger(log_file: Option<&str>, verbose: bool) -> io::Result<()> {
        let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
        let global_logger = Logger::new(log_file, level)?;

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
            return Ok(());
        }

        log::set_max_level(level);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.write_line(&message);
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}
