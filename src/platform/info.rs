//! Value types returned by [`Platform`](super::Platform) lookups.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime permissions the collector consults before touching
/// connectivity or telephony state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Read the active network and its transports.
    AccessNetworkState,
    /// Read cellular radio details.
    ReadPhoneState,
}

impl Permission {
    /// Manifest-style name used in report sentinels.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::AccessNetworkState => "ACCESS_NETWORK_STATE",
            Self::ReadPhoneState => "READ_PHONE_STATE",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_name())
    }
}

/// Manufacturer and model as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub manufacturer: String,
    pub model: String,
}

/// Operating system version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformVersion {
    /// Numeric API level, when the platform has one.
    pub api_level: Option<u32>,
    /// Human-readable release string.
    pub release: String,
}

impl PlatformVersion {
    /// Lowest API level that reports 5G (NR) radio technology.
    pub const NR_MIN_API_LEVEL: u32 = 29;

    /// Whether NR radio technology can be reported as 5G on this version.
    #[must_use]
    pub fn supports_nr(&self) -> bool {
        self.api_level.is_none_or(|level| level >= Self::NR_MIN_API_LEVEL)
    }
}

/// Block-level filesystem statistics for a storage root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub block_size: u64,
    pub block_count: u64,
    pub available_blocks: u64,
}

impl StorageStats {
    /// Total capacity in bytes.
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.block_count)
    }

    /// Free capacity in bytes.
    #[must_use]
    pub const fn free_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.available_blocks)
    }
}

/// Screen size bucket, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Undefined,
    Small,
    Normal,
    Large,
    XLarge,
}

/// Network transport technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Wifi,
    Cellular,
    Ethernet,
    Bluetooth,
    Vpn,
}

/// Transports carried by the active network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkCapabilities {
    transports: BTreeSet<Transport>,
}

impl NetworkCapabilities {
    /// Capabilities with the given transports.
    #[must_use]
    pub fn new(transports: impl IntoIterator<Item = Transport>) -> Self {
        Self {
            transports: transports.into_iter().collect(),
        }
    }

    /// Capabilities with a single transport.
    #[must_use]
    pub fn single(transport: Transport) -> Self {
        Self::new([transport])
    }

    #[must_use]
    pub fn has_transport(&self, transport: Transport) -> bool {
        self.transports.contains(&transport)
    }

    pub fn transports(&self) -> impl Iterator<Item = Transport> + '_ {
        self.transports.iter().copied()
    }
}

/// Cellular generation bucket used in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellularGeneration {
    ThirdGen,
    FourthGen,
    FifthGen,
    Other,
}

/// Cellular data radio technology, numbered like the telephony stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadioTechnology {
    Unknown,
    Gprs,
    Edge,
    Umts,
    Cdma,
    Evdo0,
    EvdoA,
    OneXRtt,
    Hsdpa,
    Hsupa,
    Hspa,
    Iden,
    EvdoB,
    Lte,
    Ehrpd,
    Hspap,
    Gsm,
    TdScdma,
    Iwlan,
    Nr,
}

impl RadioTechnology {
    /// Map a telephony network-type code to a technology.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Gprs,
            2 => Self::Edge,
            3 => Self::Umts,
            4 => Self::Cdma,
            5 => Self::Evdo0,
            6 => Self::EvdoA,
            7 => Self::OneXRtt,
            8 => Self::Hsdpa,
            9 => Self::Hsupa,
            10 => Self::Hspa,
            11 => Self::Iden,
            12 => Self::EvdoB,
            13 => Self::Lte,
            14 => Self::Ehrpd,
            15 => Self::Hspap,
            16 => Self::Gsm,
            17 => Self::TdScdma,
            18 => Self::Iwlan,
            20 => Self::Nr,
            _ => Self::Unknown,
        }
    }

    /// Generation bucket for this technology.
    ///
    /// GSM, TD-SCDMA, iDEN and IWLAN are not bucketed.
    #[must_use]
    pub const fn generation(self) -> CellularGeneration {
        match self {
            Self::Gprs
            | Self::Edge
            | Self::Cdma
            | Self::OneXRtt
            | Self::Umts
            | Self::Evdo0
            | Self::EvdoA
            | Self::Hsdpa
            | Self::Hsupa
            | Self::Hspa
            | Self::EvdoB
            | Self::Ehrpd
            | Self::Hspap => CellularGeneration::ThirdGen,
            Self::Lte => CellularGeneration::FourthGen,
            Self::Nr => CellularGeneration::FifthGen,
            Self::Unknown | Self::Iden | Self::Gsm | Self::TdScdma | Self::Iwlan => {
                CellularGeneration::Other
            }
        }
    }
}
