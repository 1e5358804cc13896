use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Expand a leading `~` to the home directory.
///
/// Other paths are returned unchanged, as is `~` itself when no home
/// directory is known.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => {
            let resolved = home.join(rest);
            debug!(
                original = %path.display(),
                resolved = %resolved.display(),
                "Expanded home directory path"
            );
            resolved
        }
        None => {
            warn!(path = %path.display(), "Could not determine home directory");
            path.to_path_buf()
        }
    }
}
