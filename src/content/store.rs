//! SQLite-backed media store answering content column queries.
//!
//! Rows are grouped by collection address (`content://media/external/images/media`,
//! `content://downloads/public_downloads`, ...). A query against an address
//! with a trailing numeric segment filters on that row id.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use super::{ContentUri, DATA_COLUMN, ID_COLUMN, Selection};
use crate::error::{FeedbackError, Result};

const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS media (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    _data TEXT NOT NULL,
    display_name TEXT,
    added_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_media_collection ON media(collection);
";

/// A row in the media store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEntry {
    pub id: i64,
    pub collection: String,
    pub data: String,
    pub display_name: Option<String>,
    pub added_at: String,
}

impl MediaEntry {
    /// Content address of this row.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

/// Database wrapper for the media store.
pub struct MediaStore {
    conn: Connection,
}

impl MediaStore {
    /// Opens or creates a store at the given path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %path.display(), "Opening media store");
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        info!(path = %path.display(), "Media store ready");
        Ok(store)
    }

    /// Creates an in-memory store.
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Default location: `<data dir>/msfeedback/media.db`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| FeedbackError::Other("Could not determine data directory".into()))?;
        Ok(base.join("msfeedback").join("media.db"))
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Registers a file under a collection and returns its row id.
    #[instrument(skip_all, fields(collection = %collection, path = %path.display()))]
    pub fn insert(&self, collection: &ContentUri, path: &Path) -> Result<i64> {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.conn.execute(
            "INSERT INTO media (collection, _data, display_name, added_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                collection.to_string(),
                path.to_string_lossy().into_owned(),
                display_name,
                Utc::now().to_rfc3339()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, path = %path.display(), "Registered media entry");
        Ok(id)
    }

    /// Lists entries, optionally limited to one collection.
    pub fn list(&self, collection: Option<&ContentUri>) -> Result<Vec<MediaEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT _id, collection, _data, display_name, added_at FROM media
             WHERE ?1 IS NULL OR collection = ?1 ORDER BY _id",
        )?;
        let filter = collection.map(ToString::to_string);
        let rows = stmt.query_map(params![filter], |row| {
            Ok(MediaEntry {
                id: row.get(0)?,
                collection: row.get(1)?,
                data: row.get(2)?,
                display_name: row.get(3)?,
                added_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Returns `column` of the first row matching `uri` and `selection`.
    ///
    /// Only the data column and `_id=?` selections are supported; anything
    /// else is an error.
    #[instrument(skip_all, fields(uri = %uri, column = %column))]
    pub fn query_column(
        &self,
        uri: &ContentUri,
        column: &str,
        selection: Option<&Selection>,
    ) -> Result<Option<String>> {
        if column != DATA_COLUMN {
            return Err(FeedbackError::ContentQuery(format!(
                "unsupported column '{column}'"
            )));
        }

        let (collection, appended_id) = uri.split_id();
        let selected_id = match selection {
            None => None,
            Some(sel) => Some(parse_id_selection(sel)?),
        };

        let id = match (appended_id, selected_id) {
            (Some(a), Some(b)) if a != b => return Ok(None),
            (a, b) => a.or(b),
        };

        trace!(collection = %collection, ?id, "Querying media store");
        let value = self
            .conn
            .query_row(
                "SELECT _data FROM media WHERE collection = ?1 AND (?2 IS NULL OR _id = ?2)
                 ORDER BY _id LIMIT 1",
                params![collection.to_string(), id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

fn parse_id_selection(selection: &Selection) -> Result<i64> {
    let expected = format!("{ID_COLUMN}=?");
    if selection.clause.replace(' ', "") != expected {
        return Err(FeedbackError::ContentQuery(format!(
            "unsupported selection '{}'",
            selection.clause
        )));
    }
    match selection.args.as_slice() {
        [arg] => arg.parse::<i64>().map_err(|_| {
            FeedbackError::ContentQuery(format!("selection argument '{arg}' is not an id"))
        }),
        _ => Err(FeedbackError::ContentQuery(
            "selection expects exactly one argument".into(),
        )),
    }
}
