//! Content references and the host-side media store.
//!
//! A picked image arrives as a URI-like reference. Document references
//! (`content://<authority>/document/<id>`) carry a provider-specific id;
//! plain content references are queried directly; file references carry
//! their path.

mod store;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;
use url::Url;

use crate::error::FeedbackError;

pub use store::{MediaEntry, MediaStore};

pub const SCHEME_CONTENT: &str = "content";
pub const SCHEME_FILE: &str = "file";

pub const AUTHORITY_EXTERNAL_STORAGE: &str = "com.android.externalstorage.documents";
pub const AUTHORITY_DOWNLOADS: &str = "com.android.providers.downloads.documents";
pub const AUTHORITY_MEDIA: &str = "com.android.providers.media.documents";

/// Canonical column holding a content row's storage path.
pub const DATA_COLUMN: &str = "_data";
/// Row id column.
pub const ID_COLUMN: &str = "_id";

/// A `content://` address: an authority plus decoded path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContentUri {
    authority: String,
    segments: Vec<String>,
}

impl ContentUri {
    pub fn new<I, S>(authority: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authority: authority.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Public downloads collection.
    #[must_use]
    pub fn public_downloads() -> Self {
        Self::new("downloads", ["public_downloads"])
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Address of a single row in this collection.
    #[must_use]
    pub fn with_appended_id(&self, id: i64) -> Self {
        let mut uri = self.clone();
        uri.segments.push(id.to_string());
        uri
    }

    /// Splits a trailing numeric id off the address, if present.
    #[must_use]
    pub fn split_id(&self) -> (Self, Option<i64>) {
        match self.segments.last().and_then(|s| s.parse::<i64>().ok()) {
            Some(id) => {
                let collection = Self {
                    authority: self.authority.clone(),
                    segments: self.segments[..self.segments.len() - 1].to_vec(),
                };
                (collection, Some(id))
            }
            None => (self.clone(), None),
        }
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME_CONTENT}://{}", self.authority)?;
        for segment in &self.segments {
            write!(f, "/{}", urlencoding::encode(segment))?;
        }
        Ok(())
    }
}

impl FromStr for ContentUri {
    type Err = FeedbackError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match ImageReference::parse(raw) {
            ImageReference::Content(uri) => Ok(uri),
            _ => Err(FeedbackError::InvalidReference {
                reference: raw.to_string(),
                reason: "not a plain content address".to_string(),
            }),
        }
    }
}

/// Row filter passed along with a column query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub clause: String,
    pub args: Vec<String>,
}

impl Selection {
    /// `_id=?` with the given id.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            clause: format!("{ID_COLUMN}=?"),
            args: vec![id.into()],
        }
    }
}

/// Media collections addressable through the media documents provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Parse the kind prefix of a media document id.
    #[must_use]
    pub fn from_document_kind(kind: &str) -> Option<Self> {
        match kind {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// External-volume collection address for this kind.
    #[must_use]
    pub fn collection_uri(self) -> ContentUri {
        let collection = match self {
            Self::Image => "images",
            Self::Video => "video",
            Self::Audio => "audio",
        };
        ContentUri::new("media", ["external", collection, "media"])
    }
}

/// A caller-supplied reference to a picked image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageReference {
    /// Provider document with an authority-specific id.
    Document {
        authority: String,
        document_id: String,
    },
    /// Plain content address.
    Content(ContentUri),
    /// Local file path.
    File(String),
    /// Anything else, kept verbatim.
    Unsupported(String),
}

impl ImageReference {
    /// Build a document reference directly.
    pub fn document(authority: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self::Document {
            authority: authority.into(),
            document_id: document_id.into(),
        }
    }

    /// Short variant name for display and JSON.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Document { .. } => "document",
            Self::Content(_) => "content",
            Self::File(_) => "file",
            Self::Unsupported(_) => "unsupported",
        }
    }

    /// Classify a raw reference string. Never fails; unrecognized input
    /// becomes [`ImageReference::Unsupported`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Ok(url) = Url::parse(raw) else {
            trace!(raw, "Reference is not a URI");
            return Self::Unsupported(raw.to_string());
        };

        if url.scheme().eq_ignore_ascii_case(SCHEME_FILE) {
            return match urlencoding::decode(url.path()) {
                Ok(path) => Self::File(path.into_owned()),
                Err(_) => Self::Unsupported(raw.to_string()),
            };
        }

        if !url.scheme().eq_ignore_ascii_case(SCHEME_CONTENT) {
            return Self::Unsupported(raw.to_string());
        }

        let authority = url.host_str().unwrap_or_default().to_string();
        let mut segments = Vec::new();
        for segment in url.path_segments().into_iter().flatten() {
            if segment.is_empty() {
                continue;
            }
            match urlencoding::decode(segment) {
                Ok(decoded) => segments.push(decoded.into_owned()),
                Err(_) => return Self::Unsupported(raw.to_string()),
            }
        }

        match document_id(&segments) {
            Some(id) => Self::Document {
                authority,
                document_id: id.to_string(),
            },
            None => Self::Content(ContentUri {
                authority,
                segments,
            }),
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document {
                authority,
                document_id,
            } => write!(
                f,
                "{SCHEME_CONTENT}://{authority}/document/{}",
                urlencoding::encode(document_id)
            ),
            Self::Content(uri) => write!(f, "{uri}"),
            Self::File(path) => write!(f, "{SCHEME_FILE}://{path}"),
            Self::Unsupported(raw) => f.write_str(raw),
        }
    }
}

/// Document id of a `document/<id>` or `tree/<t>/document/<id>` path.
fn document_id(segments: &[String]) -> Option<&str> {
    match segments {
        [first, id, ..] if first == "document" => Some(id.as_str()),
        [first, _, third, id, ..] if first == "tree" && third == "document" => Some(id.as_str()),
        _ => None,
    }
}
