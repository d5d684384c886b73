//! Report sink for command output
//!
//! Commands write their result lines through this logger. Lines always go
//! to stdout and are mirrored to a report file when one is configured.
//! Diagnostics go through the `log` facade instead.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Line-oriented report writer
pub struct Logger {
    /// File handle for report output
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a logger that only writes to stdout
    pub fn stdout_only() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the report file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// Writes a report line
    ///
    /// # Arguments
    ///
    /// * `message` - The line to write
    pub fn log(&self, message: &str) -> io::Result<()> {
        println!("{}", message);

        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "report file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }
}
