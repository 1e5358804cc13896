//! Mock platform for tests.
//!
//! Every lookup returns scripted state, any lookup can be made to fail, and
//! content queries and image decodes are recorded for assertions.
//!
//! # Example
//!
//! ```rust
//! use msfeedback::platform::mock::{Lookup, MockPlatform};
//! use msfeedback::report::DeviceInfoCollector;
//!
//! let platform = MockPlatform::new().failing(Lookup::TimeZone);
//! let report = DeviceInfoCollector::new(&platform).collect();
//! assert_eq!(report.time_zone, "N/A");
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, trace};

use super::{
    DeviceIdentity, NetworkCapabilities, Permission, Platform, PlatformVersion, RadioTechnology,
    ScreenSize, StorageStats, Transport,
};
use crate::content::{ContentUri, Selection};
use crate::error::{FeedbackError, Result};
use crate::image_ops::subsample;

/// Platform lookups that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    DeviceIdentity,
    PlatformVersion,
    AppVersion,
    Locale,
    TimeZone,
    SupportedAbis,
    ExternalStorageRoot,
    DataDirectory,
    ScreenSize,
    ActiveNetwork,
    DataNetworkType,
    QueryColumn,
}

/// Recorded call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    StorageStats {
        root: PathBuf,
    },
    QueryColumn {
        uri: String,
        column: String,
        selection: Option<Selection>,
    },
    ProbeImageBounds {
        path: PathBuf,
    },
    DecodeImage {
        path: PathBuf,
        sample_factor: u32,
    },
}

#[derive(Debug, Clone)]
struct MockRow {
    collection: ContentUri,
    id: i64,
    data: String,
}

/// Scripted [`Platform`] implementation.
pub struct MockPlatform {
    identity: DeviceIdentity,
    version: PlatformVersion,
    app_version: Option<String>,
    locale: String,
    time_zone: String,
    abis: Vec<String>,
    external_root: PathBuf,
    data_directory: PathBuf,
    storage: HashMap<PathBuf, StorageStats>,
    screen: ScreenSize,
    network: Option<NetworkCapabilities>,
    radio: RadioTechnology,
    denied: HashSet<Permission>,
    failing: HashSet<Lookup>,
    rows: Vec<MockRow>,
    images: HashMap<PathBuf, DynamicImage>,
    calls: Mutex<Vec<Call>>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatform {
    /// Mid-range phone on Wi-Fi with every permission granted.
    #[must_use]
    pub fn new() -> Self {
        let external_root = PathBuf::from("/storage/emulated/0");
        let data_directory = PathBuf::from("/data");
        let stats = StorageStats {
            block_size: 4096,
            block_count: 31_250_000,
            available_blocks: 7_812_500,
        };
        let storage = HashMap::from([
            (external_root.clone(), stats),
            (data_directory.clone(), stats),
        ]);

        debug!("Creating mock platform");

        Self {
            identity: DeviceIdentity {
                manufacturer: "Google".into(),
                model: "Pixel 8".into(),
            },
            version: PlatformVersion {
                api_level: Some(34),
                release: "14".into(),
            },
            app_version: Some("1.2.3".into()),
            locale: "en-US".into(),
            time_zone: "America/Los_Angeles".into(),
            abis: vec!["arm64-v8a".into(), "armeabi-v7a".into()],
            external_root,
            data_directory,
            storage,
            screen: ScreenSize::Normal,
            network: Some(NetworkCapabilities::single(Transport::Wifi)),
            radio: RadioTechnology::Lte,
            denied: HashSet::new(),
            failing: HashSet::new(),
            rows: Vec::new(),
            images: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    // === Configuration ===

    #[must_use]
    pub fn with_identity(mut self, manufacturer: &str, model: &str) -> Self {
        self.identity = DeviceIdentity {
            manufacturer: manufacturer.into(),
            model: model.into(),
        };
        self
    }

    #[must_use]
    pub fn with_version(mut self, api_level: Option<u32>, release: &str) -> Self {
        self.version = PlatformVersion {
            api_level,
            release: release.into(),
        };
        self
    }

    #[must_use]
    pub fn with_app_version(mut self, version: Option<&str>) -> Self {
        self.app_version = version.map(Into::into);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn with_abis(mut self, abis: &[&str]) -> Self {
        self.abis = abis.iter().map(|abi| (*abi).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_external_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.external_root = root.into();
        self
    }

    /// Set stats for a storage root.
    #[must_use]
    pub fn with_storage(mut self, root: impl Into<PathBuf>, stats: StorageStats) -> Self {
        self.storage.insert(root.into(), stats);
        self
    }

    /// Make statfs on `root` fail.
    #[must_use]
    pub fn without_storage(mut self, root: impl AsRef<Path>) -> Self {
        self.storage.remove(root.as_ref());
        self
    }

    #[must_use]
    pub fn with_screen_size(mut self, screen: ScreenSize) -> Self {
        self.screen = screen;
        self
    }

    /// Active network capabilities; `None` means disconnected.
    #[must_use]
    pub fn with_network(mut self, network: Option<NetworkCapabilities>) -> Self {
        self.network = network;
        self
    }

    #[must_use]
    pub fn with_radio(mut self, radio: RadioTechnology) -> Self {
        self.radio = radio;
        self
    }

    #[must_use]
    pub fn deny(mut self, permission: Permission) -> Self {
        self.denied.insert(permission);
        self
    }

    /// Make `lookup` return an error.
    #[must_use]
    pub fn failing(mut self, lookup: Lookup) -> Self {
        self.failing.insert(lookup);
        self
    }

    /// Add a content row with the given id under `collection`.
    #[must_use]
    pub fn with_row(mut self, collection: &ContentUri, id: i64, data: &str) -> Self {
        self.rows.push(MockRow {
            collection: collection.clone(),
            id,
            data: data.into(),
        });
        self
    }

    /// Make `path` decodable as `image`.
    #[must_use]
    pub fn with_image(mut self, path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        self.images.insert(path.into(), image);
        self
    }

    // === Assertions ===

    /// All recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded content queries only.
    #[must_use]
    pub fn queries(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::QueryColumn { .. }))
            .collect()
    }

    /// Assert a specific call was recorded at least once.
    ///
    /// # Panics
    ///
    /// Panics if the call was not found.
    pub fn assert_called(&self, expected: &Call) {
        let calls = self.calls();
        assert!(
            calls.contains(expected),
            "Expected call {expected:?} not found in: {calls:#?}",
        );
    }

    fn record(&self, call: Call) {
        trace!(?call, "Mock call");
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, lookup: Lookup) -> Result<()> {
        if self.failing.contains(&lookup) {
            return Err(FeedbackError::unavailable(
                format!("{lookup:?}"),
                "scripted failure",
            ));
        }
        Ok(())
    }

    fn image(&self, path: &Path) -> Result<&DynamicImage> {
        self.images.get(path).ok_or_else(|| FeedbackError::Decode {
            path: path.display().to_string(),
            reason: "not an image".into(),
        })
    }
}

impl Platform for MockPlatform {
    fn check_permission(&self, permission: Permission) -> bool {
        !self.denied.contains(&permission)
    }

    fn device_identity(&self) -> Result<DeviceIdentity> {
        self.check(Lookup::DeviceIdentity)?;
        Ok(self.identity.clone())
    }

    fn platform_version(&self) -> Result<PlatformVersion> {
        self.check(Lookup::PlatformVersion)?;
        Ok(self.version.clone())
    }

    fn app_version(&self) -> Result<Option<String>> {
        self.check(Lookup::AppVersion)?;
        Ok(self.app_version.clone())
    }

    fn locale(&self) -> Result<String> {
        self.check(Lookup::Locale)?;
        Ok(self.locale.clone())
    }

    fn time_zone(&self) -> Result<String> {
        self.check(Lookup::TimeZone)?;
        Ok(self.time_zone.clone())
    }

    fn supported_abis(&self) -> Result<Vec<String>> {
        self.check(Lookup::SupportedAbis)?;
        Ok(self.abis.clone())
    }

    fn external_storage_root(&self) -> Result<PathBuf> {
        self.check(Lookup::ExternalStorageRoot)?;
        Ok(self.external_root.clone())
    }

    fn data_directory(&self) -> Result<PathBuf> {
        self.check(Lookup::DataDirectory)?;
        Ok(self.data_directory.clone())
    }

    fn storage_stats(&self, root: &Path) -> Result<StorageStats> {
        self.record(Call::StorageStats {
            root: root.to_path_buf(),
        });
        self.storage
            .get(root)
            .copied()
            .ok_or_else(|| FeedbackError::unavailable("storage", root.display().to_string()))
    }

    fn screen_size(&self) -> Result<ScreenSize> {
        self.check(Lookup::ScreenSize)?;
        Ok(self.screen)
    }

    fn active_network(&self) -> Result<Option<NetworkCapabilities>> {
        self.check(Lookup::ActiveNetwork)?;
        Ok(self.network.clone())
    }

    fn data_network_type(&self) -> Result<RadioTechnology> {
        self.check(Lookup::DataNetworkType)?;
        Ok(self.radio)
    }

    fn query_column(
        &self,
        uri: &ContentUri,
        column: &str,
        selection: Option<&Selection>,
    ) -> Result<Option<String>> {
        self.record(Call::QueryColumn {
            uri: uri.to_string(),
            column: column.to_string(),
            selection: selection.cloned(),
        });
        self.check(Lookup::QueryColumn)?;

        let (collection, appended) = uri.split_id();
        let selected = match selection.and_then(|sel| sel.args.first()) {
            Some(arg) => Some(arg.parse::<i64>().map_err(|_| {
                FeedbackError::ContentQuery(format!("selection argument '{arg}' is not an id"))
            })?),
            None => None,
        };
        let id = appended.or(selected);

        Ok(self
            .rows
            .iter()
            .find(|row| row.collection == collection && id.is_none_or(|id| row.id == id))
            .map(|row| row.data.clone()))
    }

    fn probe_image_bounds(&self, path: &Path) -> Result<(u32, u32)> {
        self.record(Call::ProbeImageBounds {
            path: path.to_path_buf(),
        });
        Ok(self.image(path)?.dimensions())
    }

    fn decode_image(&self, path: &Path, sample_factor: u32) -> Result<DynamicImage> {
        self.record(Call::DecodeImage {
            path: path.to_path_buf(),
            sample_factor,
        });
        Ok(subsample(self.image(path)?.clone(), sample_factor))
    }
}
