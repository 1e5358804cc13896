//! Device and runtime diagnostics report.
//!
//! [`DeviceInfoCollector`] reads each attribute through the [`Platform`]
//! independently and degrades any failure to [`NOT_AVAILABLE`], so a report
//! is always fully populated.
//!
//! [`Platform`]: crate::platform::Platform

mod collector;
mod language;
mod network;
mod storage;

use std::fmt::{self, Write as _};

use serde::Serialize;

pub use collector::DeviceInfoCollector;
pub use language::language_display_name;
pub use network::{
    ETHERNET, MOBILE_DATA, MOBILE_DATA_3G, MOBILE_DATA_4G, MOBILE_DATA_5G,
    MOBILE_DATA_PHONE_STATE_DENIED, NETWORK_STATE_DENIED, NO_NETWORK, UNKNOWN, WIFI, network_type,
};
pub use storage::{StorageSummary, format_gigabytes, storage_summary};

/// Placeholder for any attribute that could not be read.
pub const NOT_AVAILABLE: &str = "N/A";

/// Banner printed before the report when a header is requested.
pub const REPORT_HEADER: &str = "\n ==== SYSTEM-INFO ===\n";

/// Phone or tablet, by screen size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceClass {
    Phone,
    Tablet,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phone => f.write_str("Phone"),
            Self::Tablet => f.write_str("Tablet"),
        }
    }
}

/// Snapshot of device state taken for one feedback session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    pub device_name: String,
    pub sdk_version: String,
    pub app_version: String,
    pub language: String,
    pub time_zone: String,
    pub cpu_abi: String,
    pub total_storage: String,
    pub free_storage: String,
    /// `None` when the screen size could not be read.
    pub device_class: Option<DeviceClass>,
    pub network_type: String,
}

impl DeviceReport {
    /// Labelled lines in report order.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Device", self.device_name.clone()),
            ("SDK Version", self.sdk_version.clone()),
            ("App Version", self.app_version.clone()),
            ("Language", self.language.clone()),
            ("TimeZone", self.time_zone.clone()),
            ("CPU", self.cpu_abi.clone()),
            ("Total Memory", self.total_storage.clone()),
            ("Free Memory", self.free_storage.clone()),
            (
                "Device Type",
                self.device_class
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |class| class.to_string()),
            ),
            ("Data Type", self.network_type.clone()),
        ]
    }

    /// Plain-text rendering, one `\n <Label>: <value>` line per field.
    #[must_use]
    pub fn to_text(&self, include_header: bool) -> String {
        let mut text = String::new();
        if include_header {
            text.push_str(REPORT_HEADER);
        }
        for (label, value) in self.fields() {
            let _ = write!(text, "\n {label}: {value}");
        }
        text
    }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(false))
    }
}
