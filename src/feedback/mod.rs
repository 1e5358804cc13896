//! Feedback composition and delivery.
//!
//! A session starts from a [`FeedbackRequest`] (recipient and whether to
//! attach diagnostics), the user fills a [`FeedbackDraft`], and [`compose`]
//! turns both into a [`FeedbackMessage`] that a [`Transport`] delivers.

mod compose;
mod draft;
mod outbox;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use compose::{
    Attachment, DEVICE_INFO_FILE, DEVICE_LOG_FILE, Diagnostics, FeedbackMessage, compose,
    prepare_image_attachment, prepare_image_attachments,
};
pub use draft::{FeedbackDraft, MAX_IMAGES};
pub use outbox::{Delivery, MESSAGE_MANIFEST, Transport, ZipOutbox};

/// Category selected by the user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    Suggestion,
    Bug,
    Other,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suggestion => f.write_str("Suggestion"),
            Self::Bug => f.write_str("Bug"),
            Self::Other => f.write_str("Other"),
        }
    }
}

/// Session options chosen by the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackRequest {
    pub recipient: Option<String>,
    pub with_system_info: bool,
}

impl FeedbackRequest {
    #[must_use]
    pub fn builder() -> FeedbackRequestBuilder {
        FeedbackRequestBuilder::default()
    }
}

/// Builder for [`FeedbackRequest`].
///
/// ```
/// use msfeedback::feedback::FeedbackRequest;
///
/// let request = FeedbackRequest::builder()
///     .with_email("support@example.com")
///     .with_system_info()
///     .build();
/// assert!(request.with_system_info);
/// ```
#[derive(Debug, Default)]
pub struct FeedbackRequestBuilder {
    recipient: Option<String>,
    with_system_info: bool,
}

impl FeedbackRequestBuilder {
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.recipient = Some(email.into());
        self
    }

    /// Attach the device report and the application log.
    #[must_use]
    pub const fn with_system_info(mut self) -> Self {
        self.with_system_info = true;
        self
    }

    #[must_use]
    pub fn build(self) -> FeedbackRequest {
        FeedbackRequest {
            recipient: self.recipient,
            with_system_info: self.with_system_info,
        }
    }
}
