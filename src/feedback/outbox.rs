use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{FeedbackKind, FeedbackMessage};
use crate::error::{FeedbackError, Result};

/// Metadata entry written at the root of every outbox archive.
pub const MESSAGE_MANIFEST: &str = "message.json";

/// Delivers composed messages.
pub trait Transport {
    fn send(&self, message: &FeedbackMessage) -> Result<Delivery>;
}

/// Outcome of a successful [`Transport::send`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub message_id: Uuid,
    /// Where the message ended up.
    pub location: PathBuf,
    pub attachments: usize,
}

/// Writes each message as `feedback-<id>.zip` in a directory.
#[derive(Debug, Clone)]
pub struct ZipOutbox {
    dir: PathBuf,
}

#[derive(Serialize)]
struct Manifest<'a> {
    id: Uuid,
    created_at: DateTime<Utc>,
    kind: FeedbackKind,
    recipient: &'a str,
    subject: &'a str,
    body: &'a str,
    attachments: Vec<ManifestEntry<'a>>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    file_name: &'a str,
    media_type: &'a str,
    size: usize,
    sha256: String,
}

impl ZipOutbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `feedback-outbox` in the platform data directory.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("msfeedback"))
            .unwrap_or_default()
            .join("feedback-outbox")
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Archive path for a message id.
    #[must_use]
    pub fn archive_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("feedback-{id}.zip"))
    }

    fn write_archive(path: &Path, manifest: &[u8], message: &FeedbackMessage) -> Result<()> {
        let mut zip = ZipWriter::new(File::create(path)?);
        let options = SimpleFileOptions::default();

        zip.start_file(MESSAGE_MANIFEST, options)?;
        zip.write_all(manifest)?;
        for attachment in &message.attachments {
            zip.start_file(attachment.file_name.as_str(), options)?;
            zip.write_all(&attachment.bytes)?;
        }
        zip.finish()?;
        Ok(())
    }

    fn manifest(message: &FeedbackMessage) -> Manifest<'_> {
        Manifest {
            id: message.id,
            created_at: message.created_at,
            kind: message.kind,
            recipient: &message.recipient,
            subject: &message.subject,
            body: &message.body,
            attachments: message
                .attachments
                .iter()
                .map(|a| ManifestEntry {
                    file_name: &a.file_name,
                    media_type: &a.media_type,
                    size: a.bytes.len(),
                    sha256: hex::encode(Sha256::digest(&a.bytes)),
                })
                .collect(),
        }
    }
}

impl Transport for ZipOutbox {
    #[instrument(skip_all, fields(id = %message.id, dir = %self.dir.display()))]
    fn send(&self, message: &FeedbackMessage) -> Result<Delivery> {
        fs::create_dir_all(&self.dir)?;
        let path = self.archive_path(message.id);

        let manifest = serde_json::to_vec_pretty(&Self::manifest(message))
            .map_err(|e| FeedbackError::Archive(format!("Failed to encode manifest: {e}")))?;

        // Only complete archives carry the final name.
        let partial = path.with_extension("zip.partial");
        let written = Self::write_archive(&partial, &manifest, message)
            .and_then(|()| fs::rename(&partial, &path).map_err(FeedbackError::from));
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&partial) {
                warn!(path = %partial.display(), error = %cleanup, "Could not remove partial archive");
            }
            return Err(err);
        }

        info!(path = %path.display(), "Wrote feedback archive");
        Ok(Delivery {
            message_id: message.id,
            location: path,
            attachments: message.attachments.len(),
        })
    }
}
