use tracing::{debug, info, instrument, warn};

use super::{
    DeviceClass, DeviceReport, NOT_AVAILABLE, format_gigabytes, language_display_name,
    network_type, storage_summary,
};
use crate::error::Result;
use crate::platform::{DeviceIdentity, Platform, PlatformVersion, ScreenSize};

/// Builds [`DeviceReport`]s from a [`Platform`].
pub struct DeviceInfoCollector<'p> {
    platform: &'p dyn Platform,
}

impl<'p> DeviceInfoCollector<'p> {
    pub const fn new(platform: &'p dyn Platform) -> Self {
        Self { platform }
    }

    /// Read every attribute. Never fails; unreadable fields are `N/A`.
    #[instrument(skip(self))]
    pub fn collect(&self) -> DeviceReport {
        let platform = self.platform;
        let storage = storage_summary(platform);

        let report = DeviceReport {
            device_name: field("device", platform.device_identity().map(|id| device_name(&id))),
            sdk_version: field("sdk", platform.platform_version().map(|v| sdk_version(&v))),
            app_version: field(
                "app_version",
                platform
                    .app_version()
                    .map(|v| v.unwrap_or_else(|| NOT_AVAILABLE.to_string())),
            ),
            language: field("language", platform.locale().map(|tag| language_display_name(&tag))),
            time_zone: field("time_zone", platform.time_zone()),
            cpu_abi: field(
                "cpu",
                platform
                    .supported_abis()
                    .map(|abis| abis.into_iter().next().unwrap_or_else(|| NOT_AVAILABLE.to_string())),
            ),
            total_storage: storage
                .map_or_else(|| NOT_AVAILABLE.to_string(), |s| format_gigabytes(s.total_bytes)),
            free_storage: storage
                .map_or_else(|| NOT_AVAILABLE.to_string(), |s| format_gigabytes(s.free_bytes)),
            device_class: match platform.screen_size() {
                Ok(size) => Some(device_class(size)),
                Err(e) => {
                    warn!(error = %e, "Screen size unavailable");
                    None
                }
            },
            network_type: field("network", network_type(platform).map(str::to_string)),
        };

        info!(device = %report.device_name, network = %report.network_type, "Collected device report");
        report
    }

    /// Collect and render as plain text.
    pub fn collect_text(&self, include_header: bool) -> String {
        self.collect().to_text(include_header)
    }
}

/// Unwrap a lookup, degrading failures and empty values to `N/A`.
fn field<T: Into<String>>(name: &str, lookup: Result<T>) -> String {
    match lookup {
        Ok(value) => {
            let value = value.into();
            if value.trim().is_empty() {
                debug!(field = name, "Empty value");
                NOT_AVAILABLE.to_string()
            } else {
                value
            }
        }
        Err(e) => {
            warn!(field = name, error = %e, "Attribute unavailable");
            NOT_AVAILABLE.to_string()
        }
    }
}

/// `Pixel 8` by `Google` becomes `Google Pixel 8`; a model already
/// carrying the manufacturer name is used as is.
fn device_name(identity: &DeviceIdentity) -> String {
    let DeviceIdentity {
        manufacturer,
        model,
    } = identity;

    let prefixed = model
        .get(..manufacturer.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(manufacturer));
    if prefixed {
        capitalize(model)
    } else {
        format!("{} {model}", capitalize(manufacturer))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn sdk_version(version: &PlatformVersion) -> String {
    match version.api_level {
        Some(level) => format!("SDK {level}"),
        None => version.release.clone(),
    }
}

fn device_class(size: ScreenSize) -> DeviceClass {
    if size >= ScreenSize::Large {
        DeviceClass::Tablet
    } else {
        DeviceClass::Phone
    }
}
