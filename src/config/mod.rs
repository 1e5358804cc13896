//! Configuration for feedback sessions and the host platform.
//!
//! Loaded from YAML or TOML; every field has a default, so an empty or
//! missing file yields a usable configuration.
//!
//! # Example TOML
//!
//! ```toml
//! recipient = "support@example.com"
//! with_system_info = true
//! log_file = "~/.local/share/myapp/logs.txt"
//!
//! [attachment]
//! max_width = 1280
//! max_height = 1280
//! quality = 75
//!
//! [host]
//! screen_size = "normal"
//! denied_permissions = ["read-phone-state"]
//! ```

mod loader;
mod path;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::applog::AppLog;
use crate::error::{FeedbackError, Result};
use crate::feedback::{FeedbackRequest, ZipOutbox};
use crate::image_ops::{DEFAULT_THUMBNAIL_SIZE, Quality};
use crate::platform::HostSettings;

pub use loader::{ConfigFormat, default_config_path, load_config, load_config_from_str, load_or_default};
pub use path::expand_home;

/// Target box for on-screen thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_THUMBNAIL_SIZE,
            height: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

/// How picked images are re-encoded before attaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttachmentSettings {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality, clamped to 1-100.
    pub quality: u32,
}

impl Default for AttachmentSettings {
    fn default() -> Self {
        Self {
            max_width: 1280,
            max_height: 1280,
            quality: u32::from(Quality::default().value()),
        }
    }
}

impl AttachmentSettings {
    #[must_use]
    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }

    #[must_use]
    pub const fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Address feedback is sent to.
    pub recipient: Option<String>,

    /// Attach the device report and log to every message.
    pub with_system_info: bool,

    /// Application log file (default: `<data dir>/msfeedback/logs.txt`).
    pub log_file: Option<PathBuf>,

    /// Where composed messages are archived.
    pub outbox_dir: Option<PathBuf>,

    pub thumbnail: ThumbnailSettings,

    pub attachment: AttachmentSettings,

    /// Host platform overrides.
    pub host: HostSettings,
}

impl FeedbackConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// [`FeedbackError::ConfigParse`] for a malformed recipient or a zero
    /// image dimension.
    pub fn validate(&self) -> Result<()> {
        trace!("Validating feedback config");

        if let Some(recipient) = &self.recipient {
            let recipient = recipient.trim();
            let valid = recipient
                .split_once('@')
                .is_some_and(|(user, domain)| !user.is_empty() && !domain.is_empty());
            if !valid {
                return Err(FeedbackError::ConfigParse(format!(
                    "Invalid recipient '{recipient}': expected an email address"
                )));
            }
        }

        let dimensions = [
            ("thumbnail.width", self.thumbnail.width),
            ("thumbnail.height", self.thumbnail.height),
            ("attachment.max_width", self.attachment.max_width),
            ("attachment.max_height", self.attachment.max_height),
        ];
        for (name, value) in dimensions {
            if value == 0 {
                return Err(FeedbackError::ConfigParse(format!("{name} must be positive")));
            }
        }

        debug!("Feedback config validated");
        Ok(())
    }

    /// Session request, with `email` taking precedence over the configured
    /// recipient.
    #[must_use]
    pub fn request(&self, email: Option<&str>, with_info: bool) -> FeedbackRequest {
        let mut builder = FeedbackRequest::builder();
        if let Some(email) = email.or(self.recipient.as_deref()) {
            builder = builder.with_email(email);
        }
        if with_info || self.with_system_info {
            builder = builder.with_system_info();
        }
        builder.build()
    }

    #[must_use]
    pub fn app_log(&self) -> AppLog {
        let path = self
            .log_file
            .as_deref()
            .map_or_else(AppLog::default_path, expand_home);
        AppLog::new(path)
    }

    #[must_use]
    pub fn outbox(&self) -> ZipOutbox {
        let dir = self
            .outbox_dir
            .as_deref()
            .map_or_else(ZipOutbox::default_dir, expand_home);
        ZipOutbox::new(dir)
    }

    /// Host settings with `~` expanded in every path.
    #[must_use]
    pub fn host_settings(&self) -> HostSettings {
        let mut host = self.host.clone();
        for path in [
            &mut host.external_storage_root,
            &mut host.data_directory,
            &mut host.media_store,
        ]
        .into_iter()
        .flatten()
        {
            *path = expand_home(path);
        }
        host
    }
}
