use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, trace};

use super::FeedbackConfig;
use crate::error::{FeedbackError, Result};

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// `<config dir>/msfeedback/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("msfeedback").join("config.toml"))
}

/// Load a configuration file, detecting the format from its extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FeedbackConfig> {
    let path = path.as_ref();
    info!("Loading configuration file");

    let format = ConfigFormat::from_extension(path).ok_or_else(|| {
        FeedbackError::ConfigParse(format!(
            "Unknown config format for '{}': expected .yaml, .yml, or .toml",
            path.display()
        ))
    })?;
    debug!(format = ?format, "Detected config format");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FeedbackError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            FeedbackError::Io(e)
        }
    })?;
    debug!(bytes = content.len(), "Read config file");

    load_config_from_str(&content, format)
}

/// Parse and validate configuration text.
#[instrument(skip(content), fields(format = ?format, content_len = content.len()))]
pub fn load_config_from_str(content: &str, format: ConfigFormat) -> Result<FeedbackConfig> {
    let config: FeedbackConfig = if content.trim().is_empty() {
        FeedbackConfig::default()
    } else {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| FeedbackError::ConfigParse(format!("YAML: {e}")))?,
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| FeedbackError::ConfigParse(format!("TOML: {e}")))?,
        }
    };

    config.validate()?;

    info!(
        recipient = ?config.recipient,
        with_system_info = config.with_system_info,
        "Configuration loaded and validated"
    );
    Ok(config)
}

/// Load `explicit` if given; otherwise the default path, falling back to
/// defaults when that file does not exist.
///
/// An explicitly named file must exist.
pub fn load_or_default(explicit: Option<&Path>) -> Result<FeedbackConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        path => {
            debug!(path = ?path, "No config file, using defaults");
            Ok(FeedbackConfig::default())
        }
    }
}
