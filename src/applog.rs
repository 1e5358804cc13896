//! Append-only plain-text application log.
//!
//! Writes never fail from the caller's point of view: IO errors are logged
//! through `tracing` and dropped.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, instrument, warn};

/// Default log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "logs.txt";

/// Returned by [`AppLog::read_all`] when nothing has been logged.
pub const NO_LOGS: &str = "No logs available";

/// Append-only UTF-8 log, one message per line.
#[derive(Debug, Clone)]
pub struct AppLog {
    path: PathBuf,
}

impl AppLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log in the platform data directory, or the working directory when
    /// there is none.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("msfeedback"))
            .unwrap_or_default()
            .join(LOG_FILE_NAME)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `message` plus a newline.
    #[instrument(skip(self, message), fields(path = %self.path.display()))]
    pub fn append(&self, message: &str) {
        if let Err(e) = self.try_append(message) {
            warn!(error = %e, "Failed to append to log");
        }
    }

    /// Append the session start marker.
    pub fn record_session_start(&self) {
        let millis = Utc::now().timestamp_millis();
        self.append(&format!("Feedback session initialized at {millis}"));
    }

    /// Entire log contents.
    ///
    /// A missing log is created empty. Empty logs read as [`NO_LOGS`]; read
    /// failures come back as an `Error retrieving logs` line.
    pub fn read_all(&self) -> String {
        match self.try_read() {
            Ok(contents) if contents.is_empty() => NO_LOGS.to_string(),
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read log");
                format!("Error retrieving logs: {e}")
            }
        }
    }

    fn try_append(&self, message: &str) -> std::io::Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{message}")?;
        debug!(len = message.len(), "Appended log line");
        Ok(())
    }

    fn try_read(&self) -> std::io::Result<String> {
        if !self.path.exists() {
            self.ensure_parent()?;
            fs::File::create(&self.path)?;
            debug!(path = %self.path.display(), "Created empty log");
            return Ok(String::new());
        }
        fs::read_to_string(&self.path)
    }

    fn ensure_parent(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}
