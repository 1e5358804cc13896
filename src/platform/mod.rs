//! Platform capability layer.
//!
//! Every read of live device state goes through [`Platform`], so the
//! collector, resolver and downsampler run unchanged against the desktop
//! host or a scripted mock.

mod host;
mod info;
pub mod mock;

pub use host::{HostPlatform, HostSettings};
pub use info::{
    CellularGeneration, DeviceIdentity, NetworkCapabilities, Permission, PlatformVersion,
    RadioTechnology, ScreenSize, StorageStats, Transport,
};

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::content::{ContentUri, Selection};
use crate::error::Result;

/// Capability interface over device state, content queries and image decoding.
///
/// Lookups return `Err` when the attribute cannot be read; callers decide
/// whether that degrades to a sentinel or propagates.
pub trait Platform: Send + Sync {
    /// Whether `permission` is currently granted. Never prompts.
    fn check_permission(&self, permission: Permission) -> bool;

    fn device_identity(&self) -> Result<DeviceIdentity>;

    fn platform_version(&self) -> Result<PlatformVersion>;

    /// Version name of the host application. `Ok(None)` when unset.
    fn app_version(&self) -> Result<Option<String>>;

    /// Locale tag, e.g. `en-US`.
    fn locale(&self) -> Result<String>;

    /// Time zone id, e.g. `Europe/Berlin`.
    fn time_zone(&self) -> Result<String>;

    /// Supported CPU ABIs, preferred first.
    fn supported_abis(&self) -> Result<Vec<String>>;

    /// Root of shared external storage.
    fn external_storage_root(&self) -> Result<PathBuf>;

    /// Root of the private data partition.
    fn data_directory(&self) -> Result<PathBuf>;

    /// Filesystem statistics for the volume containing `root`.
    fn storage_stats(&self, root: &Path) -> Result<StorageStats>;

    fn screen_size(&self) -> Result<ScreenSize>;

    /// Capabilities of the active network; `Ok(None)` when disconnected.
    fn active_network(&self) -> Result<Option<NetworkCapabilities>>;

    /// Radio technology of the cellular data connection.
    fn data_network_type(&self) -> Result<RadioTechnology>;

    /// Single-column query against a content address.
    fn query_column(
        &self,
        uri: &ContentUri,
        column: &str,
        selection: Option<&Selection>,
    ) -> Result<Option<String>>;

    /// Image dimensions `(width, height)` without decoding pixels.
    fn probe_image_bounds(&self, path: &Path) -> Result<(u32, u32)>;

    /// Decode an image, subsampled by `sample_factor` on both axes.
    fn decode_image(&self, path: &Path, sample_factor: u32) -> Result<DynamicImage>;
}
