//! Maps picked image references to storage paths.
//!
//! Resolution never fails loudly: a malformed id, an unsupported volume or a
//! failed content query all come back as `None`, which callers surface as
//! "unable to resolve image path".

use tracing::{debug, instrument, trace};

use crate::content::{
    AUTHORITY_DOWNLOADS, AUTHORITY_EXTERNAL_STORAGE, AUTHORITY_MEDIA, ContentUri, DATA_COLUMN,
    ImageReference, MediaKind, Selection,
};
use crate::platform::Platform;

/// Volume name of the primary shared storage.
pub const PRIMARY_VOLUME: &str = "primary";

/// Resolves [`ImageReference`]s against a [`Platform`].
pub struct PathResolver<'p> {
    platform: &'p dyn Platform,
}

impl<'p> PathResolver<'p> {
    pub const fn new(platform: &'p dyn Platform) -> Self {
        Self { platform }
    }

    /// Parse and resolve a raw reference string.
    pub fn resolve_str(&self, raw: &str) -> Option<String> {
        self.resolve(&ImageReference::parse(raw))
    }

    /// Storage path behind `reference`, or `None` when it cannot be resolved.
    #[instrument(skip(self), fields(reference = %reference))]
    pub fn resolve(&self, reference: &ImageReference) -> Option<String> {
        let resolved = match reference {
            ImageReference::Document {
                authority,
                document_id,
            } => match authority.as_str() {
                AUTHORITY_EXTERNAL_STORAGE => self.external_storage(document_id),
                AUTHORITY_DOWNLOADS => self.downloads(document_id),
                AUTHORITY_MEDIA => self.media(document_id),
                other => {
                    debug!(authority = other, "Unsupported document authority");
                    None
                }
            },
            ImageReference::Content(uri) => self.query_data_column(Some(uri), None),
            ImageReference::File(path) => Some(path.clone()),
            ImageReference::Unsupported(_) => None,
        };
        trace!(resolved = ?resolved, "Resolution finished");
        resolved
    }

    /// `primary:<relative>` maps under the external storage root; other
    /// volumes are not resolved.
    fn external_storage(&self, document_id: &str) -> Option<String> {
        let (volume, relative) = document_id.split_once(':')?;
        if !volume.eq_ignore_ascii_case(PRIMARY_VOLUME) {
            debug!(volume, "Secondary storage volumes are not resolved");
            return None;
        }
        let root = match self.platform.external_storage_root() {
            Ok(root) => root,
            Err(e) => {
                debug!(error = %e, "External storage root unavailable");
                return None;
            }
        };
        Some(format!("{}/{relative}", root.display()))
    }

    fn downloads(&self, document_id: &str) -> Option<String> {
        let Ok(id) = document_id.parse::<i64>() else {
            debug!(document_id, "Download id is not numeric");
            return None;
        };
        let uri = ContentUri::public_downloads().with_appended_id(id);
        self.query_data_column(Some(&uri), None)
    }

    fn media(&self, document_id: &str) -> Option<String> {
        let (kind, id) = document_id.split_once(':')?;
        let collection = MediaKind::from_document_kind(kind).map(MediaKind::collection_uri);
        if collection.is_none() {
            debug!(kind, "Unknown media kind");
        }
        self.query_data_column(collection.as_ref(), Some(&Selection::by_id(id)))
    }

    /// First row's data column at `uri`; `None` for a missing address,
    /// an empty result or a failed query.
    fn query_data_column(
        &self,
        uri: Option<&ContentUri>,
        selection: Option<&Selection>,
    ) -> Option<String> {
        let uri = uri?;
        match self.platform.query_column(uri, DATA_COLUMN, selection) {
            Ok(value) => value,
            Err(e) => {
                debug!(uri = %uri, error = %e, "Content query failed");
                None
            }
        }
    }
}
