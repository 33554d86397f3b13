//! Integration tests for canonical model serialization.

use mdmlink_core::{Brand, Device, DeviceDetail, DeviceQuery, DeviceStatus, Location, Permissions};

#[test]
fn test_device_roundtrip_preserves_neutral_defaults() {
    let device = Device {
        id: 9,
        device_status: DeviceStatus::LostLocked,
        serial_number: "SER".into(),
        ..Device::default()
    };
    let json = serde_json::to_string(&device).unwrap();
    let parsed: Device = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.id, 9);
    assert_eq!(parsed.device_status, DeviceStatus::LostLocked);
    assert!(parsed.phone_model.is_empty());
    assert_eq!(parsed.http_proxy_status, 0);
}

#[test]
fn test_device_detail_tolerates_sparse_payloads() {
    let detail: DeviceDetail = serde_json::from_str(r#"{"id": 5, "imei": "86000"}"#).unwrap();
    assert_eq!(detail.id, 5);
    assert_eq!(detail.imei.as_deref(), Some("86000"));
    assert!(detail.phone_number2.is_none());
    assert!(detail.device_capacity.is_none());
}

#[test]
fn test_query_roundtrip() {
    let query = DeviceQuery::new(Brand::AndroidSeekdream, "ABC123", "app")
        .with_merchant_id("M1")
        .with_mdm_id(77);
    let json = serde_json::to_string(&query).unwrap();
    assert!(json.contains(r#""brand":"android-seekdream""#));
    let parsed: DeviceQuery = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.mdm_id, Some(77));
    assert_eq!(parsed.merchant_id.as_deref(), Some("M1"));
}

#[test]
fn test_location_list_preserves_order() {
    let json = r#"[
        {"deviceId": 1, "serialNumber": "A", "lng": 10.0, "lat": 20.0},
        {"deviceId": 1, "serialNumber": "A", "lng": 11.0, "lat": 21.0},
        {"deviceId": 1, "serialNumber": "A", "lng": 12.0, "lat": 22.0}
    ]"#;
    let locations: Vec<Location> = serde_json::from_str(json).unwrap();
    let lngs: Vec<f64> = locations.iter().map(|l| l.lng).collect();
    assert_eq!(lngs, vec![10.0, 11.0, 12.0]);
}

#[test]
fn test_permissions_wire_form_matches_vendor_keys() {
    let json = serde_json::to_string(&Permissions::supervision_defaults()).unwrap();
    for key in [
        "forceAutomaticDateAndTime",
        "allowFindMyDevice",
        "allowUIConfigurationProfileInstallation",
        "allowEnterpriseAppTrust",
        "allowVPNCreation",
        "forceWiFiPowerOn",
        "allowAccountModification",
    ] {
        assert!(json.contains(key), "missing vendor key {key}");
    }
}
