use serde::Serialize;
use tracing::debug;

use super::FeedbackKind;
use crate::content::ImageReference;
use crate::error::{FeedbackError, Result};

/// Most images a single message can carry.
pub const MAX_IMAGES: usize = 3;

/// User-editable feedback form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackDraft {
    pub kind: FeedbackKind,
    pub title: String,
    pub description: String,
    images: Vec<ImageReference>,
}

impl FeedbackDraft {
    pub fn new(
        kind: FeedbackKind,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            images: Vec::new(),
        }
    }

    #[must_use]
    pub fn images(&self) -> &[ImageReference] {
        &self.images
    }

    /// Add an image, returning its slot index.
    ///
    /// # Errors
    ///
    /// [`FeedbackError::AttachmentLimit`] once [`MAX_IMAGES`] are attached.
    pub fn attach_image(&mut self, reference: ImageReference) -> Result<usize> {
        if self.images.len() >= MAX_IMAGES {
            return Err(FeedbackError::AttachmentLimit { max: MAX_IMAGES });
        }
        debug!(%reference, slot = self.images.len(), "Attached image");
        self.images.push(reference);
        Ok(self.images.len() - 1)
    }

    /// Remove the image at `index`; later images shift down.
    pub fn remove_image(&mut self, index: usize) -> Option<ImageReference> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Whether both title and description have non-blank text.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check the title first, then the description.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(FeedbackError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(FeedbackError::MissingDescription);
        }
        Ok(())
    }
}
