//! Human-friendly output implementation using console.

use std::path::Path;

use console::Term;
use tracing::{debug, instrument, trace};

use crate::config::FeedbackConfig;
use crate::content::MediaEntry;
use crate::error::FeedbackError;
use crate::report::{DeviceReport, NOT_AVAILABLE, REPORT_HEADER};
use crate::theme::Theme;

use super::{
    MediaAdded, Output, ResolveResult, SampleFactorResult, SubmitResult, ThumbnailResult,
};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    out: Term,
    err: Term,
    theme: Theme,
}

impl HumanOutput {
    #[instrument]
    pub fn new(colors: bool) -> Self {
        debug!("Creating HumanOutput");
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: Theme::new(colors),
        }
    }

    fn print(&self, line: &str) {
        // Nothing useful to do if stdout is gone.
        let _ = self.out.write_line(line);
    }

    fn eprint(&self, line: &str) {
        let _ = self.err.write_line(line);
    }

    fn field(&self, label: &str, value: &str) {
        let value = if value == NOT_AVAILABLE {
            self.theme.missing.apply_to(value)
        } else {
            self.theme.value.apply_to(value)
        };
        self.print(&format!(
            "  {} {value}",
            self.theme.label.apply_to(format!("{label:<14}"))
        ));
    }
}

impl Output for HumanOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        self.print(&format!("{} {message}", self.theme.success.apply_to("[OK]")));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &FeedbackError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        self.eprint(&format!(
            "{} {}",
            self.theme.error.apply_to("[ERR]"),
            self.theme.value.apply_to(error)
        ));
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            self.eprint(&format!(
                "  {} {}",
                self.theme.label.apply_to("Suggestion:"),
                self.theme.muted.apply_to(suggestion)
            ));
        }
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        self.eprint(&format!("{} {message}", self.theme.warning.apply_to("[WARN]")));
    }

    #[instrument(skip(self))]
    fn info(&self, message: &str) {
        self.print(&format!("{} {message}", self.theme.accent.apply_to("[INFO]")));
    }

    #[instrument(skip_all)]
    fn device_report(&self, report: &DeviceReport, include_header: bool) {
        if include_header {
            self.print(&self.theme.header.apply_to(REPORT_HEADER.trim()).to_string());
        }
        for (label, value) in report.fields() {
            self.field(label, &value);
        }
    }

    #[instrument(skip(self, contents), fields(len = contents.len()))]
    fn logs(&self, path: &Path, contents: &str) {
        self.print(
            &self
                .theme
                .muted
                .apply_to(format!("# {}", path.display()))
                .to_string(),
        );
        self.print(contents.trim_end());
    }

    #[instrument(skip(self))]
    fn log_appended(&self, path: &Path, _message: &str) {
        self.success(&format!("Appended to {}", path.display()));
    }

    #[instrument(skip_all, fields(reference = %result.reference))]
    fn resolved(&self, result: &ResolveResult) {
        match &result.path {
            Some(path) => self.print(path),
            None => self.warning(&format!(
                "Unable to resolve image path: {} ({})",
                result.reference, result.kind
            )),
        }
    }

    #[instrument(skip_all)]
    fn sample_factor(&self, result: &SampleFactorResult) {
        self.field(
            "Source",
            &format!("{}x{}", result.source_width, result.source_height),
        );
        self.field(
            "Target",
            &format!("{}x{}", result.target_width, result.target_height),
        );
        self.field("Sample factor", &result.sample_factor.to_string());
    }

    #[instrument(skip_all, fields(output = %result.output))]
    fn thumbnail_written(&self, result: &ThumbnailResult) {
        self.success(&format!(
            "Wrote {}x{} thumbnail to {} ({} bytes, quality {})",
            result.width, result.height, result.output, result.bytes, result.quality
        ));
        self.field("Source", &result.source);
    }

    #[instrument(skip_all, fields(id = added.id))]
    fn media_added(&self, added: &MediaAdded) {
        self.success(&format!("Registered {} as {}", added.path, added.uri));
    }

    #[instrument(skip_all, fields(count = entries.len()))]
    fn media_list(&self, entries: &[MediaEntry]) {
        if entries.is_empty() {
            self.warning("No media registered");
            return;
        }
        for entry in entries {
            self.print(&format!(
                "  {}  {}",
                self.theme.accent.apply_to(entry.uri()),
                entry.data
            ));
        }
    }

    #[instrument(skip_all)]
    fn submitted(&self, result: &SubmitResult) {
        self.success(&format!(
            "Feedback for {} saved to {}",
            result.recipient,
            result.delivery.location.display()
        ));
        self.field("Subject", &result.subject);
        let attachments = if result.attachments.is_empty() {
            "none".to_string()
        } else {
            result.attachments.join(", ")
        };
        self.field("Attachments", &attachments);
        if result.skipped_images > 0 {
            self.warning(&format!(
                "{} image(s) could not be attached",
                result.skipped_images
            ));
        }
    }

    #[instrument(skip_all)]
    fn config(&self, config: &FeedbackConfig, source: Option<&Path>) {
        let source = source.map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
        self.field("Source", &source);
        self.field(
            "Recipient",
            config.recipient.as_deref().unwrap_or(NOT_AVAILABLE),
        );
        self.field("System info", &config.with_system_info.to_string());
        self.field("Log file", &config.app_log().path().display().to_string());
        self.field("Outbox", &config.outbox().dir().display().to_string());
        self.field(
            "Thumbnail",
            &format!("{}x{}", config.thumbnail.width, config.thumbnail.height),
        );
        self.field(
            "Attachments",
            &format!(
                "{}x{} @ quality {}",
                config.attachment.max_width,
                config.attachment.max_height,
                config.attachment.quality().value()
            ),
        );
    }

    #[instrument(skip(self))]
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        self.field("Version", version);
        if let Some(sha) = git_sha {
            self.field("Git SHA", sha);
        }
        if let Some(time) = build_time {
            self.field("Built", time);
        }
    }
}
