//! Diagnostic logging for msfeedback.
//!
//! Every log line goes to stderr so stdout stays reserved for command output.
//! The filter comes from `RUST_LOG` when set (e.g.
//! `msfeedback=debug,rusqlite=warn`), otherwise from `-v`/`-q`.

use std::io::{self, IsTerminal};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Rendering of log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// One JSON object per line, with targets.
    Json,
    /// Colored lines for an interactive terminal.
    Ansi,
    /// Compact lines without escapes for pipes and files.
    Plain,
}

impl LogStyle {
    /// Robot mode always gets JSON; humans get color only on a terminal.
    #[must_use]
    pub const fn detect(robot_mode: bool, stderr_is_tty: bool) -> Self {
        match (robot_mode, stderr_is_tty) {
            (true, _) => Self::Json,
            (false, true) => Self::Ansi,
            (false, false) => Self::Plain,
        }
    }
}

/// Filter directive for `-v` count and `-q`. Quiet wins.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "msfeedback=error";
    }
    match verbose {
        0 => "msfeedback=info",
        1 => "msfeedback=debug",
        _ => "msfeedback=trace",
    }
}

fn stderr_layer(style: LogStyle) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr);

    match style {
        LogStyle::Json => layer.json().with_target(true).boxed(),
        LogStyle::Ansi => layer.with_target(false).boxed(),
        LogStyle::Plain => layer.with_ansi(false).with_target(false).compact().boxed(),
    }
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    let style = LogStyle::detect(robot_mode, io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(stderr_layer(style).with_filter(filter))
        .init();
}
