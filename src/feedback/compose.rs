use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{FeedbackDraft, FeedbackKind, FeedbackRequest};
use crate::applog::AppLog;
use crate::content::ImageReference;
use crate::error::{FeedbackError, Result};
use crate::image_ops::{self, Quality};
use crate::platform::Platform;
use crate::report::DeviceInfoCollector;

/// Attachment name of the device report.
pub const DEVICE_INFO_FILE: &str = "device_info.txt";
/// Attachment name of the application log.
pub const DEVICE_LOG_FILE: &str = "device_log.txt";

const TEXT_PLAIN: &str = "text/plain";
const IMAGE_JPEG: &str = "image/jpeg";

/// File carried by a [`FeedbackMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub file_name: String,
    pub media_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn text(file_name: impl Into<String>, text: &str) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: TEXT_PLAIN.to_string(),
            bytes: text.as_bytes().to_vec(),
        }
    }

    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: IMAGE_JPEG.to_string(),
            bytes,
        }
    }
}

/// Device report and log captured for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub device_info: String,
    pub log: String,
}

impl Diagnostics {
    /// Collect the report (with header) and read the log. Never fails.
    #[instrument(skip_all)]
    pub fn gather(platform: &dyn Platform, log: &AppLog) -> Self {
        Self {
            device_info: DeviceInfoCollector::new(platform).collect_text(true),
            log: log.read_all(),
        }
    }
}

/// A composed message ready for a transport.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackMessage {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub kind: FeedbackKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

/// Build the message for `draft`.
///
/// Diagnostics are attached only when the request asks for system info.
/// `images` are attached after them, in order.
///
/// # Errors
///
/// Draft validation errors first, then [`FeedbackError::EmailNotSet`] when
/// the request has no recipient.
#[instrument(skip_all, fields(kind = %draft.kind))]
pub fn compose(
    request: &FeedbackRequest,
    draft: &FeedbackDraft,
    diagnostics: Option<&Diagnostics>,
    images: Vec<Attachment>,
) -> Result<FeedbackMessage> {
    draft.validate()?;
    let recipient = request
        .recipient
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or(FeedbackError::EmailNotSet)?;

    let subject = format!("MsFeedback Type: {}", draft.kind);
    let body = format!(
        "{subject}\nTitle: {}\nDescription: {}",
        draft.title.trim(),
        draft.description.trim()
    );

    let mut attachments = Vec::with_capacity(images.len() + 2);
    if request.with_system_info {
        match diagnostics {
            Some(diagnostics) => {
                attachments.push(Attachment::text(DEVICE_INFO_FILE, &diagnostics.device_info));
                attachments.push(Attachment::text(DEVICE_LOG_FILE, &diagnostics.log));
            }
            None => warn!("System info requested but no diagnostics were gathered"),
        }
    }
    attachments.extend(images);

    let message = FeedbackMessage {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        kind: draft.kind,
        recipient: recipient.to_string(),
        subject,
        body,
        attachments,
    };
    info!(id = %message.id, attachments = message.attachments.len(), "Composed feedback message");
    Ok(message)
}

/// Resolve, downsample and JPEG-encode one picked image.
///
/// `slot` numbers the attachment file name (`image-1.jpg` for slot 0).
pub fn prepare_image_attachment(
    platform: &dyn Platform,
    reference: &ImageReference,
    slot: usize,
    bounds: (u32, u32),
    quality: Quality,
) -> Result<Attachment> {
    let image = image_ops::load_thumbnail(platform, reference, bounds.0, bounds.1)?;
    let bytes = image_ops::compress(&image, quality)?;
    Ok(Attachment::jpeg(format!("image-{}.jpg", slot + 1), bytes))
}

/// Prepare every image of `draft`, skipping the ones that fail.
pub fn prepare_image_attachments(
    platform: &dyn Platform,
    draft: &FeedbackDraft,
    bounds: (u32, u32),
    quality: Quality,
) -> Vec<Attachment> {
    draft
        .images()
        .iter()
        .enumerate()
        .filter_map(|(slot, reference)| {
            match prepare_image_attachment(platform, reference, slot, bounds, quality) {
                Ok(attachment) => Some(attachment),
                Err(e) => {
                    warn!(%reference, error = %e, "Skipping image attachment");
                    None
                }
            }
        })
        .collect()
}
