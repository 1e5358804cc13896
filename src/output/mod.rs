//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::Serialize;

use crate::cli::Cli;
use crate::config::FeedbackConfig;
use crate::content::MediaEntry;
use crate::error::FeedbackError;
use crate::feedback::Delivery;
use crate::report::DeviceReport;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

// === Command Result Types ===

/// Outcome of resolving one reference.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResult {
    pub reference: String,
    /// Classification of the reference (`document`, `content`, `file`, `unsupported`).
    pub kind: &'static str,
    pub path: Option<String>,
}

/// Sample factor for a source/target pair.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SampleFactorResult {
    pub source_width: u32,
    pub source_height: u32,
    pub target_width: u32,
    pub target_height: u32,
    pub sample_factor: u32,
}

/// A thumbnail written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailResult {
    pub reference: String,
    pub source: String,
    pub output: String,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub bytes: usize,
}

/// A row added to the media store.
#[derive(Debug, Clone, Serialize)]
pub struct MediaAdded {
    pub id: i64,
    pub uri: String,
    pub path: String,
}

/// A message handed to the outbox.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResult {
    pub recipient: String,
    pub subject: String,
    pub attachments: Vec<String>,
    /// Picked images that could not be prepared.
    pub skipped_images: usize,
    pub delivery: Delivery,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for AI agents and scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human { colors: bool },
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human {
                colors: !cli.no_color && console::colors_enabled(),
            }
        }
    }

    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { colors } => Box::new(HumanOutput::new(colors)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &FeedbackError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    // Diagnostics
    fn device_report(&self, report: &DeviceReport, include_header: bool);
    fn logs(&self, path: &Path, contents: &str);
    fn log_appended(&self, path: &Path, message: &str);

    // Images
    fn resolved(&self, result: &ResolveResult);
    fn sample_factor(&self, result: &SampleFactorResult);
    fn thumbnail_written(&self, result: &ThumbnailResult);

    // Media store
    fn media_added(&self, added: &MediaAdded);
    fn media_list(&self, entries: &[MediaEntry]);

    // Feedback
    fn submitted(&self, result: &SubmitResult);

    // Metadata
    fn config(&self, config: &FeedbackConfig, source: Option<&Path>);
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>);
}
