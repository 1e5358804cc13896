//! Integration tests for device report collection.

use msfeedback::platform::mock::{Lookup, MockPlatform};
use msfeedback::platform::{
    NetworkCapabilities, Permission, RadioTechnology, ScreenSize, StorageStats, Transport,
};
use msfeedback::report::{
    DeviceClass, DeviceInfoCollector, MOBILE_DATA, MOBILE_DATA_4G, MOBILE_DATA_5G,
    MOBILE_DATA_PHONE_STATE_DENIED, NETWORK_STATE_DENIED, NO_NETWORK, NOT_AVAILABLE,
    REPORT_HEADER,
};

#[test]
fn test_full_report_text() {
    let platform = MockPlatform::new();
    let text = DeviceInfoCollector::new(&platform).collect_text(true);

    let expected = [
        REPORT_HEADER,
        "\n Device: Google Pixel 8",
        "\n SDK Version: SDK 34",
        "\n App Version: 1.2.3",
        "\n Language: English",
        "\n TimeZone: America/Los_Angeles",
        "\n CPU: arm64-v8a",
        "\n Total Memory: 119.21 GB",
        "\n Free Memory: 29.80 GB",
        "\n Device Type: Phone",
        "\n Data Type: Wi-Fi",
    ]
    .concat();
    assert_eq!(text, expected);
}

#[test]
fn test_every_lookup_failing_still_reports() {
    let platform = [
        Lookup::DeviceIdentity,
        Lookup::PlatformVersion,
        Lookup::AppVersion,
        Lookup::Locale,
        Lookup::TimeZone,
        Lookup::SupportedAbis,
        Lookup::ExternalStorageRoot,
        Lookup::DataDirectory,
        Lookup::ScreenSize,
        Lookup::ActiveNetwork,
    ]
    .into_iter()
    .fold(MockPlatform::new(), MockPlatform::failing);

    let report = DeviceInfoCollector::new(&platform).collect();
    for (label, value) in report.fields() {
        assert_eq!(value, NOT_AVAILABLE, "{label} should degrade");
    }
    assert_eq!(report.device_class, None);
}

#[test]
fn test_storage_falls_back_to_data_directory() {
    let stats = StorageStats {
        block_size: 1024,
        block_count: 2 * 1024 * 1024,
        available_blocks: 512 * 1024,
    };
    let platform = MockPlatform::new()
        .without_storage("/storage/emulated/0")
        .with_storage("/data", stats);

    let report = DeviceInfoCollector::new(&platform).collect();
    assert_eq!(report.total_storage, "2.00 GB");
    assert_eq!(report.free_storage, "0.50 GB");
}

#[test]
fn test_tablet_on_cellular_5g() {
    let platform = MockPlatform::new()
        .with_screen_size(ScreenSize::Large)
        .with_network(Some(NetworkCapabilities::single(Transport::Cellular)))
        .with_radio(RadioTechnology::Nr);

    let report = DeviceInfoCollector::new(&platform).collect();
    assert_eq!(report.device_class, Some(DeviceClass::Tablet));
    assert_eq!(report.network_type, MOBILE_DATA_5G);
}

#[test]
fn test_nr_on_old_platform_is_plain_mobile_data() {
    let platform = MockPlatform::new()
        .with_version(Some(28), "9")
        .with_network(Some(NetworkCapabilities::single(Transport::Cellular)))
        .with_radio(RadioTechnology::Nr);

    let report = DeviceInfoCollector::new(&platform).collect();
    assert_eq!(report.sdk_version, "SDK 28");
    assert_eq!(report.network_type, MOBILE_DATA);
}

#[test]
fn test_network_permissions() {
    let denied = MockPlatform::new().deny(Permission::AccessNetworkState);
    assert_eq!(
        DeviceInfoCollector::new(&denied).collect().network_type,
        NETWORK_STATE_DENIED
    );

    let phone_denied = MockPlatform::new()
        .with_network(Some(NetworkCapabilities::single(Transport::Cellular)))
        .deny(Permission::ReadPhoneState);
    assert_eq!(
        DeviceInfoCollector::new(&phone_denied).collect().network_type,
        MOBILE_DATA_PHONE_STATE_DENIED
    );

    let lte = MockPlatform::new()
        .with_network(Some(NetworkCapabilities::new([
            Transport::Cellular,
            Transport::Vpn,
        ])));
    assert_eq!(
        DeviceInfoCollector::new(&lte).collect().network_type,
        MOBILE_DATA_4G
    );
}

#[test]
fn test_disconnected_and_unknown_radio_failure() {
    let offline = MockPlatform::new().with_network(None);
    assert_eq!(
        DeviceInfoCollector::new(&offline).collect().network_type,
        NO_NETWORK
    );

    let radio_fails = MockPlatform::new()
        .with_network(Some(NetworkCapabilities::single(Transport::Cellular)))
        .failing(Lookup::DataNetworkType);
    assert_eq!(
        DeviceInfoCollector::new(&radio_fails).collect().network_type,
        NOT_AVAILABLE
    );
}

#[test]
fn test_report_serializes_for_robot_mode() {
    let platform = MockPlatform::new()
        .with_identity("samsung", "SM-S918B")
        .with_locale("de_DE");
    let report = DeviceInfoCollector::new(&platform).collect();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["device_name"], "Samsung SM-S918B");
    assert_eq!(json["language"], "German");
    assert_eq!(json["device_class"], "Phone");
    assert_eq!(json["network_type"], "Wi-Fi");
}
