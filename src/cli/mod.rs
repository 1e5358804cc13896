//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::content::MediaKind;
use crate::feedback::FeedbackKind;
use crate::image_ops::DEFAULT_THUMBNAIL_SIZE;

/// msfeedback - device diagnostics and feedback composition.
///
/// Robot Mode: Use --robot or --format json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "msfeedback", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "MSFEEDBACK_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (YAML or TOML)
    #[arg(long, short = 'c', global = true, env = "MSFEEDBACK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Diagnostics ===
    /// Collect the device and runtime report
    #[command(visible_alias = "info")]
    Report(ReportArgs),

    /// Append a line to the application log
    Log(LogArgs),

    /// Print the application log
    Logs,

    // === Images ===
    /// Resolve an image reference to a storage path
    Resolve(ResolveArgs),

    /// Compute the power-of-two decode sample factor
    SampleFactor(SampleFactorArgs),

    /// Decode a referenced image into a bounded JPEG thumbnail
    Thumbnail(ThumbnailArgs),

    /// Manage the local media store
    #[command(subcommand)]
    Media(MediaCommands),

    // === Feedback ===
    /// Compose feedback and write it to the outbox
    Submit(SubmitArgs),

    // === Utilities ===
    /// Show the effective configuration
    Config,

    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Omit the SYSTEM-INFO banner
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Parser, Debug)]
pub struct LogArgs {
    /// Message to append
    #[arg(value_name = "MESSAGE")]
    pub message: String,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// `content://`, `file://` or other URI
    #[arg(value_name = "URI")]
    pub reference: String,
}

#[derive(Parser, Debug)]
pub struct SampleFactorArgs {
    /// Source width in pixels
    pub source_width: u32,
    /// Source height in pixels
    pub source_height: u32,
    /// Target width in pixels
    pub target_width: u32,
    /// Target height in pixels
    pub target_height: u32,
}

#[derive(Parser, Debug)]
pub struct ThumbnailArgs {
    /// Image reference (URI)
    #[arg(value_name = "REF")]
    pub reference: String,

    /// Target width (default from config, 600)
    #[arg(long, short = 'W')]
    pub width: Option<u32>,

    /// Target height (default from config, 600)
    #[arg(long, short = 'H')]
    pub height: Option<u32>,

    /// JPEG quality 1-100
    #[arg(long, default_value_t = 80)]
    pub quality: u32,

    /// Where to write the JPEG
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

impl ThumbnailArgs {
    /// Requested box, falling back to `defaults` then the built-in size.
    pub fn bounds(&self, defaults: Option<(u32, u32)>) -> (u32, u32) {
        let (w, h) = defaults.unwrap_or((DEFAULT_THUMBNAIL_SIZE, DEFAULT_THUMBNAIL_SIZE));
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }
}

#[derive(Subcommand, Debug)]
pub enum MediaCommands {
    /// Register a file under a media collection
    Add(MediaAddArgs),

    /// List registered media
    List(MediaListArgs),
}

#[derive(Parser, Debug)]
pub struct MediaAddArgs {
    /// Media collection
    #[arg(value_enum)]
    pub kind: MediaKind,

    /// File to register
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct MediaListArgs {
    /// Only this collection
    #[arg(value_enum)]
    pub kind: Option<MediaKind>,
}

#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// Feedback title
    #[arg(long, short = 't')]
    pub title: String,

    /// Feedback description
    #[arg(long, short = 'd')]
    pub description: String,

    /// Feedback category
    #[arg(long, short = 'k', value_enum, default_value = "suggestion")]
    pub kind: FeedbackKind,

    /// Image reference to attach (repeatable, at most 3)
    #[arg(long = "image", short = 'i', value_name = "REF")]
    pub images: Vec<String>,

    /// Recipient address (overrides config)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Attach device report and log
    #[arg(long)]
    pub with_info: bool,

    /// Outbox directory (overrides config)
    #[arg(long)]
    pub outbox: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
