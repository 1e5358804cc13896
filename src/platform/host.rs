//! Desktop host implementation of [`Platform`].
//!
//! Reads OS, disk and network state through `sysinfo`, the locale through
//! `sys-locale`, and answers content queries from a [`MediaStore`].
//! Attributes a desktop has no notion of (screen bucket, app version) come
//! from [`HostSettings`].

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};
use sysinfo::{Disks, Networks, System};
use tracing::{debug, instrument, trace};

use super::{
    DeviceIdentity, NetworkCapabilities, Permission, Platform, PlatformVersion, RadioTechnology,
    ScreenSize, StorageStats, Transport,
};
use crate::content::{ContentUri, MediaStore, Selection};
use crate::error::{FeedbackError, Result};
use crate::image_ops::subsample;

const DMI_VENDOR: &str = "/sys/class/dmi/id/sys_vendor";
const DMI_PRODUCT: &str = "/sys/class/dmi/id/product_name";

/// Host attributes supplied by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostSettings {
    /// Reported application version. Defaults to this crate's version.
    pub app_version: Option<String>,
    /// Screen size bucket. Unset reports `N/A`.
    pub screen_size: Option<ScreenSize>,
    /// Permissions to report as denied.
    pub denied_permissions: Vec<Permission>,
    /// Override for the external storage root (default: home directory).
    pub external_storage_root: Option<PathBuf>,
    /// Override for the data directory (default: platform data dir).
    pub data_directory: Option<PathBuf>,
    /// Media store database path (default: `<data dir>/msfeedback/media.db`).
    pub media_store: Option<PathBuf>,
}

/// [`Platform`] backed by the machine this process runs on.
pub struct HostPlatform {
    settings: HostSettings,
    media: Option<Mutex<MediaStore>>,
}

impl HostPlatform {
    /// Host platform without a media store; content queries fail.
    #[must_use]
    pub fn new(settings: HostSettings) -> Self {
        Self {
            settings,
            media: None,
        }
    }

    /// Host platform with its media store opened from settings.
    pub fn open(settings: HostSettings) -> Result<Self> {
        let path = match &settings.media_store {
            Some(path) => path.clone(),
            None => MediaStore::default_path()?,
        };
        let store = MediaStore::open(&path)?;
        Ok(Self::new(settings).with_media_store(store))
    }

    #[must_use]
    pub fn with_media_store(mut self, store: MediaStore) -> Self {
        self.media = Some(Mutex::new(store));
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// Run `f` against the media store.
    pub fn with_media<T>(&self, f: impl FnOnce(&MediaStore) -> Result<T>) -> Result<T> {
        let media = self
            .media
            .as_ref()
            .ok_or_else(|| FeedbackError::ContentQuery("media store is not open".into()))?;
        let store = media
            .lock()
            .map_err(|_| FeedbackError::ContentQuery("media store lock poisoned".into()))?;
        f(&store)
    }

    fn require(&self, permission: Permission) -> Result<()> {
        if self.check_permission(permission) {
            Ok(())
        } else {
            Err(FeedbackError::PermissionDenied {
                permission: permission.to_string(),
            })
        }
    }
}

impl Platform for HostPlatform {
    fn check_permission(&self, permission: Permission) -> bool {
        !self.settings.denied_permissions.contains(&permission)
    }

    fn device_identity(&self) -> Result<DeviceIdentity> {
        let manufacturer = read_trimmed(DMI_VENDOR)
            .ok_or_else(|| FeedbackError::unavailable("manufacturer", "no DMI vendor"))?;
        let model = read_trimmed(DMI_PRODUCT)
            .ok_or_else(|| FeedbackError::unavailable("model", "no DMI product name"))?;
        Ok(DeviceIdentity {
            manufacturer,
            model,
        })
    }

    fn platform_version(&self) -> Result<PlatformVersion> {
        let release = System::long_os_version()
            .or_else(System::os_version)
            .ok_or_else(|| FeedbackError::unavailable("os version", "not reported"))?;
        Ok(PlatformVersion {
            api_level: None,
            release,
        })
    }

    fn app_version(&self) -> Result<Option<String>> {
        Ok(Some(
            self.settings
                .app_version
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        ))
    }

    fn locale(&self) -> Result<String> {
        sys_locale::get_locale().ok_or_else(|| FeedbackError::unavailable("locale", "not reported"))
    }

    fn time_zone(&self) -> Result<String> {
        if let Ok(tz) = std::env::var("TZ") {
            let tz = tz.trim().trim_start_matches(':');
            if !tz.is_empty() {
                return Ok(tz.to_string());
            }
        }
        if let Some(tz) = read_trimmed("/etc/timezone") {
            return Ok(tz);
        }
        if let Ok(target) = fs::read_link("/etc/localtime") {
            let target = target.to_string_lossy();
            if let Some((_, zone)) = target.split_once("zoneinfo/") {
                return Ok(zone.to_string());
            }
        }
        Err(FeedbackError::unavailable("time zone", "not configured"))
    }

    fn supported_abis(&self) -> Result<Vec<String>> {
        Ok(vec![std::env::consts::ARCH.to_string()])
    }

    fn external_storage_root(&self) -> Result<PathBuf> {
        self.settings
            .external_storage_root
            .clone()
            .or_else(dirs::home_dir)
            .ok_or_else(|| FeedbackError::unavailable("external storage root", "no home directory"))
    }

    fn data_directory(&self) -> Result<PathBuf> {
        self.settings
            .data_directory
            .clone()
            .or_else(dirs::data_dir)
            .ok_or_else(|| FeedbackError::unavailable("data directory", "not reported"))
    }

    #[instrument(skip(self))]
    fn storage_stats(&self, root: &Path) -> Result<StorageStats> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .filter(|disk| root.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().components().count())
            .ok_or_else(|| {
                FeedbackError::unavailable(
                    "storage",
                    format!("no mounted volume contains {}", root.display()),
                )
            })?;
        trace!(mount = %disk.mount_point().display(), "Matched volume");
        Ok(StorageStats {
            block_size: 1,
            block_count: disk.total_space(),
            available_blocks: disk.available_space(),
        })
    }

    fn screen_size(&self) -> Result<ScreenSize> {
        self.settings
            .screen_size
            .ok_or_else(|| FeedbackError::unavailable("screen size", "not configured"))
    }

    #[instrument(skip(self))]
    fn active_network(&self) -> Result<Option<NetworkCapabilities>> {
        self.require(Permission::AccessNetworkState)?;
        let networks = Networks::new_with_refreshed_list();
        let mut names: Vec<&String> = networks
            .list()
            .iter()
            .filter(|(_, data)| {
                data.ip_networks()
                    .iter()
                    .any(|net| is_routable(&net.addr))
            })
            .map(|(name, _)| name)
            .collect();
        names.sort();

        if names.is_empty() {
            debug!("No interface with a routable address");
            return Ok(None);
        }

        let capabilities = capabilities_for_interfaces(names.iter().map(|name| name.as_str()));
        debug!(interfaces = ?names, ?capabilities, "Active network");
        Ok(Some(capabilities))
    }

    fn data_network_type(&self) -> Result<RadioTechnology> {
        self.require(Permission::ReadPhoneState)?;
        // No modem API on the desktop; report an unbucketed technology.
        Ok(RadioTechnology::Unknown)
    }

    fn query_column(
        &self,
        uri: &ContentUri,
        column: &str,
        selection: Option<&Selection>,
    ) -> Result<Option<String>> {
        self.with_media(|store| store.query_column(uri, column, selection))
    }

    fn probe_image_bounds(&self, path: &Path) -> Result<(u32, u32)> {
        let reader = ImageReader::open(path).map_err(|_| FeedbackError::ImageNotFound {
            path: path.display().to_string(),
        })?;
        reader
            .with_guessed_format()
            .map_err(|e| decode_error(path, &e))?
            .into_dimensions()
            .map_err(|e| decode_error(path, &e))
    }

    #[instrument(skip(self))]
    fn decode_image(&self, path: &Path, sample_factor: u32) -> Result<DynamicImage> {
        let reader = ImageReader::open(path).map_err(|_| FeedbackError::ImageNotFound {
            path: path.display().to_string(),
        })?;
        let image = reader
            .with_guessed_format()
            .map_err(|e| decode_error(path, &e))?
            .decode()
            .map_err(|e| decode_error(path, &e))?;
        Ok(subsample(image, sample_factor))
    }
}

fn decode_error(path: &Path, err: &dyn std::error::Error) -> FeedbackError {
    FeedbackError::Decode {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn read_trimmed(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let trimmed = contents.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Err(e) => {
            trace!(path, error = %e, "Unreadable attribute file");
            None
        }
    }
}

fn is_routable(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => !v4.is_loopback() && !v4.is_link_local() && !v4.is_unspecified(),
        IpAddr::V6(v6) => {
            !v6.is_loopback() && !v6.is_unspecified() && (v6.segments()[0] & 0xffc0) != 0xfe80
        }
    }
}

/// Union of the transports implied by every interface that is up.
pub(crate) fn capabilities_for_interfaces<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> NetworkCapabilities {
    NetworkCapabilities::new(names.into_iter().filter_map(transport_for_interface))
}

/// Transport implied by a network interface name.
pub(crate) fn transport_for_interface(name: &str) -> Option<Transport> {
    const PREFIXES: &[(&str, Transport)] = &[
        ("wlan", Transport::Wifi),
        ("wl", Transport::Wifi),
        ("wwan", Transport::Cellular),
        ("ww", Transport::Cellular),
        ("rmnet", Transport::Cellular),
        ("ccmni", Transport::Cellular),
        ("eth", Transport::Ethernet),
        ("en", Transport::Ethernet),
        ("bnep", Transport::Bluetooth),
        ("tun", Transport::Vpn),
        ("tap", Transport::Vpn),
        ("wg", Transport::Vpn),
    ];
    let transport = PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, transport)| *transport);
    if transport.is_none() {
        trace!(interface = name, "Unrecognized interface naming");
    }
    transport
}
