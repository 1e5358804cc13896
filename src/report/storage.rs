use serde::Serialize;
use tracing::{debug, warn};

use crate::platform::{Platform, StorageStats};

const BYTES_PER_GIGABYTE: f64 = 1024.0 * 1024.0 * 1024.0;

/// Total and free bytes of the first readable storage root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageSummary {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl From<StorageStats> for StorageSummary {
    fn from(stats: StorageStats) -> Self {
        Self {
            total_bytes: stats.total_bytes(),
            free_bytes: stats.free_bytes(),
        }
    }
}

/// Stats for external storage, falling back to the data directory.
///
/// `None` when neither root can be read.
pub fn storage_summary(platform: &dyn Platform) -> Option<StorageSummary> {
    let roots = [
        ("external", platform.external_storage_root()),
        ("data", platform.data_directory()),
    ];

    for (name, root) in roots {
        let stats = root.and_then(|root| platform.storage_stats(&root));
        match stats {
            Ok(stats) => {
                debug!(root = name, ?stats, "Read storage stats");
                return Some(stats.into());
            }
            Err(e) => debug!(root = name, error = %e, "Storage root unavailable"),
        }
    }

    warn!("No storage root could be read");
    None
}

/// Two-decimal gigabytes, base 1024.
///
/// ```
/// use msfeedback::report::format_gigabytes;
///
/// assert_eq!(format_gigabytes(8 * 1024 * 1024 * 1024), "8.00 GB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_gigabytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GIGABYTE)
}
