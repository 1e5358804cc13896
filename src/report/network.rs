//! Active network classification.

use tracing::debug;

use crate::error::Result;
use crate::platform::{CellularGeneration, Permission, Platform, Transport};

pub const NETWORK_STATE_DENIED: &str = "Permission Denied (ACCESS_NETWORK_STATE)";
pub const NO_NETWORK: &str = "No Network";
pub const WIFI: &str = "Wi-Fi";
pub const MOBILE_DATA_PHONE_STATE_DENIED: &str = "Mobile Data (Permission Denied: READ_PHONE_STATE)";
pub const MOBILE_DATA_3G: &str = "Mobile Data 3G";
pub const MOBILE_DATA_4G: &str = "Mobile Data 4G";
pub const MOBILE_DATA_5G: &str = "Mobile Data 5G";
pub const MOBILE_DATA: &str = "Mobile Data";
pub const ETHERNET: &str = "Ethernet";
pub const UNKNOWN: &str = "Unknown";

/// Describe the active network.
///
/// Wi-Fi wins over cellular, cellular over Ethernet. Cellular detail needs
/// `READ_PHONE_STATE`; 5G is only reported from API 29 on.
///
/// # Errors
///
/// Any platform lookup failure in the chain.
pub fn network_type(platform: &dyn Platform) -> Result<&'static str> {
    if !platform.check_permission(Permission::AccessNetworkState) {
        return Ok(NETWORK_STATE_DENIED);
    }

    let Some(capabilities) = platform.active_network()? else {
        return Ok(NO_NETWORK);
    };

    if capabilities.has_transport(Transport::Wifi) {
        return Ok(WIFI);
    }

    if capabilities.has_transport(Transport::Cellular) {
        if !platform.check_permission(Permission::ReadPhoneState) {
            return Ok(MOBILE_DATA_PHONE_STATE_DENIED);
        }
        let radio = platform.data_network_type()?;
        debug!(?radio, "Cellular data connection");
        return Ok(match radio.generation() {
            CellularGeneration::ThirdGen => MOBILE_DATA_3G,
            CellularGeneration::FourthGen => MOBILE_DATA_4G,
            CellularGeneration::FifthGen if platform.platform_version()?.supports_nr() => {
                MOBILE_DATA_5G
            }
            CellularGeneration::FifthGen | CellularGeneration::Other => MOBILE_DATA,
        });
    }

    if capabilities.has_transport(Transport::Ethernet) {
        return Ok(ETHERNET);
    }

    Ok(UNKNOWN)
}
