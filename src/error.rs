//! Error types for feedback and diagnostics operations.

use thiserror::Error;

/// Primary error type for msfeedback operations.
#[derive(Error, Debug)]
pub enum FeedbackError {
    // Platform lookups
    #[error("Attribute unavailable: {attribute}: {reason}")]
    AttributeUnavailable { attribute: String, reason: String },

    #[error("Permission denied: {permission}")]
    PermissionDenied { permission: String },

    // Content references and images
    #[error("Unable to resolve image path: {reference}")]
    PathUnresolved { reference: String },

    #[error("Invalid content reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Failed to load image {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("Image file not found: {path}")]
    ImageNotFound { path: String },

    #[error("Content query failed: {0}")]
    ContentQuery(String),

    // Feedback composition
    #[error("Feedback title is empty")]
    MissingTitle,

    #[error("Feedback description is empty")]
    MissingDescription,

    #[error("You can only attach up to {max} images")]
    AttachmentLimit { max: usize },

    #[error("Feedback recipient email is not set")]
    EmailNotSet,

    #[error("Outbox archive error: {0}")]
    Archive(String),

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FeedbackError {
    /// Shorthand for an [`FeedbackError::AttributeUnavailable`] error.
    pub fn unavailable(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AttributeUnavailable {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PathUnresolved { .. }
                | Self::InvalidReference { .. }
                | Self::ImageNotFound { .. }
                | Self::MissingTitle
                | Self::MissingDescription
                | Self::AttachmentLimit { .. }
                | Self::EmailNotSet
                | Self::ConfigNotFound { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::PathUnresolved { .. } => {
                Some("Register the file with: msfeedback media add <KIND> <PATH>")
            }
            Self::MissingTitle => Some("Pass a non-empty --title"),
            Self::MissingDescription => Some("Pass a non-empty --description"),
            Self::AttachmentLimit { .. } => Some("Remove an image before attaching another"),
            Self::EmailNotSet => Some("Use --email or set `recipient` in the config file"),
            Self::ConfigNotFound { .. } => Some("Check the --config path"),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for FeedbackError {
    fn from(err: rusqlite::Error) -> Self {
        Self::ContentQuery(err.to_string())
    }
}

impl From<zip::result::ZipError> for FeedbackError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

/// Convenience type alias for Results using FeedbackError.
pub type Result<T> = std::result::Result<T, FeedbackError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| FeedbackError::Other(format!("{}: {e}", f().into())))
    }
}
