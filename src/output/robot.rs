//! Robot mode JSON output implementation.

use std::path::Path;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, instrument, trace};

use crate::config::FeedbackConfig;
use crate::content::MediaEntry;
use crate::error::FeedbackError;
use crate::report::DeviceReport;

use super::{
    MediaAdded, Output, ResolveResult, RobotFormat, SampleFactorResult, SubmitResult,
    ThumbnailResult,
};

/// JSON output implementation for AI agents and scripting.
///
/// Results go to stdout, errors to stderr.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match json {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                Some(json)
            }
            Err(e) => {
                error!(error = %e, "Failed to serialize output");
                None
            }
        }
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            println!("{json}");
        }
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        self.output_json(&json!({ "success": true, "message": message }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &FeedbackError) {
        debug!(error = %error, "Robot: error");
        let body = json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        if let Some(json) = self.render(&body) {
            eprintln!("{json}");
        }
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        self.output_json(&json!({ "warning": true, "message": message }));
    }

    #[instrument(skip(self))]
    fn info(&self, message: &str) {
        self.output_json(&json!({ "info": true, "message": message }));
    }

    #[instrument(skip_all)]
    fn device_report(&self, report: &DeviceReport, _include_header: bool) {
        debug!("Robot: device_report");
        self.output_json(report);
    }

    #[instrument(skip(self, contents), fields(len = contents.len()))]
    fn logs(&self, path: &Path, contents: &str) {
        self.output_json(&json!({
            "path": path.display().to_string(),
            "contents": contents,
        }));
    }

    #[instrument(skip(self))]
    fn log_appended(&self, path: &Path, message: &str) {
        self.output_json(&json!({
            "path": path.display().to_string(),
            "message": message,
            "ok": true,
        }));
    }

    #[instrument(skip_all, fields(reference = %result.reference))]
    fn resolved(&self, result: &ResolveResult) {
        self.output_json(result);
    }

    #[instrument(skip_all)]
    fn sample_factor(&self, result: &SampleFactorResult) {
        self.output_json(result);
    }

    #[instrument(skip_all, fields(output = %result.output))]
    fn thumbnail_written(&self, result: &ThumbnailResult) {
        self.output_json(result);
    }

    #[instrument(skip_all, fields(id = added.id))]
    fn media_added(&self, added: &MediaAdded) {
        self.output_json(added);
    }

    #[instrument(skip_all, fields(count = entries.len()))]
    fn media_list(&self, entries: &[MediaEntry]) {
        self.output_json(entries);
    }

    #[instrument(skip_all)]
    fn submitted(&self, result: &SubmitResult) {
        self.output_json(result);
    }

    #[instrument(skip_all)]
    fn config(&self, config: &FeedbackConfig, source: Option<&Path>) {
        self.output_json(&json!({
            "source": source.map(|p| p.display().to_string()),
            "config": config,
        }));
    }

    #[instrument(skip(self))]
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        self.output_json(&json!({
            "version": version,
            "git_sha": git_sha,
            "build_time": build_time,
        }));
    }
}
