//! Test fixture helpers for creating temporary test data.
//!
//! A [`TestWorkspace`] owns a temporary directory holding a config file whose
//! log, outbox and media store all point inside it, so CLI runs never touch
//! the real data directory.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

pub const RECIPIENT: &str = "support@example.com";

pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Workspace with a recipient configured.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or config cannot be written.
    #[must_use]
    pub fn new() -> Self {
        Self::with_recipient(Some(RECIPIENT))
    }

    #[must_use]
    pub fn with_recipient(recipient: Option<&str>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = dir.path();
        let mut config = String::new();
        if let Some(recipient) = recipient {
            config.push_str(&format!("recipient = {recipient:?}\n"));
        }
        config.push_str(&format!(
            "log_file = {:?}\noutbox_dir = {:?}\n\n[attachment]\nmax_width = 64\nmax_height = 64\nquality = 70\n\n[host]\napp_version = \"9.9.9\"\nscreen_size = \"xlarge\"\nmedia_store = {:?}\n",
            root.join("logs.txt").display().to_string(),
            root.join("outbox").display().to_string(),
            root.join("media.db").display().to_string(),
        ));
        std::fs::write(root.join("config.toml"), config).expect("Failed to write config");
        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.path().join("logs.txt")
    }

    #[must_use]
    pub fn outbox_dir(&self) -> PathBuf {
        self.path().join("outbox")
    }

    /// Write a solid-color PNG and return its path.
    #[must_use]
    pub fn write_png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path().join(name);
        RgbImage::from_pixel(width, height, Rgb([30, 144, 255]))
            .save(&path)
            .unwrap_or_else(|_| panic!("Failed to save image at {path:?}"));
        path
    }

    /// Files currently in the outbox.
    #[must_use]
    pub fn outbox_archives(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(self.outbox_dir()) else {
            return Vec::new();
        };
        let mut archives: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
        archives.sort();
        archives
    }
}

/// `file://` reference for a local path.
#[must_use]
pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}
