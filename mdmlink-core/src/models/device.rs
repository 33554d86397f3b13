//! Canonical device-facing value types.
//!
//! Every type here is a vendor-neutral reshaping of one vendor's JSON
//! response. Fields a given vendor does not report are populated with a
//! neutral default (empty string, `None`, zero) — callers must treat those
//! as "unknown", not "false".

use serde::{Deserialize, Serialize};

use super::brand::DeviceStatus;

// ============================================================================
// Device
// ============================================================================

/// A managed device as reported by a vendor backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Vendor-internal device id.
    #[serde(default)]
    pub id: i64,
    /// Regulation status.
    pub device_status: DeviceStatus,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Hardware serial number.
    #[serde(default)]
    pub serial_number: String,
    /// Activation lock flag (0/1).
    #[serde(default)]
    pub activation_lock_status: u8,
    /// JSON-encoded restriction map, as the vendor stores it.
    #[serde(default)]
    pub function_restrict_data: String,
    /// HTTP proxy flag (0/1).
    #[serde(default)]
    pub http_proxy_status: u8,
    /// Hardware model name.
    #[serde(default)]
    pub phone_model: String,
    /// Pending command payloads, when the vendor reports them.
    #[serde(default)]
    pub command_content_list: Option<Vec<String>>,
    /// Operator that assigned the device.
    #[serde(default)]
    pub device_assigned_by: String,
    /// Device color.
    #[serde(default)]
    pub color: Option<String>,
    /// Enrollment timestamp, `YYYYMMDDHHmmss`.
    #[serde(default)]
    pub create_time: String,
    /// Owning merchant, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    /// IMEI, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            id: 0,
            device_status: DeviceStatus::Unregulated,
            description: String::new(),
            serial_number: String::new(),
            activation_lock_status: 0,
            function_restrict_data: String::new(),
            http_proxy_status: 0,
            phone_model: String::new(),
            command_content_list: None,
            device_assigned_by: String::new(),
            color: None,
            create_time: String::new(),
            merchant_id: None,
            imei: None,
        }
    }
}

// ============================================================================
// Device Detail
// ============================================================================

/// Per-device hardware identifiers, where the vendor exposes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetail {
    /// Vendor-internal device id.
    #[serde(default)]
    pub id: i64,
    /// Primary IMEI.
    #[serde(default)]
    pub imei: Option<String>,
    /// Primary MEID.
    #[serde(default)]
    pub meid: Option<String>,
    /// Secondary IMEI.
    #[serde(default)]
    pub imei2: Option<String>,
    /// Secondary MEID.
    #[serde(default)]
    pub meid2: Option<String>,
    /// Primary carrier.
    #[serde(default)]
    pub mvno: Option<String>,
    /// Secondary carrier.
    #[serde(default)]
    pub mvno2: Option<String>,
    /// Primary phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Secondary phone number.
    #[serde(default)]
    pub phone_number2: Option<String>,
    /// Storage capacity.
    #[serde(default)]
    pub device_capacity: Option<String>,
}

// ============================================================================
// Location
// ============================================================================

/// A recorded device location.
///
/// Coordinates are always numeric, regardless of the wire format the vendor
/// used. Lists preserve vendor order; ordering is vendor-defined and not
/// normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Vendor-internal device id, zero when the vendor omits it.
    #[serde(default)]
    pub device_id: i64,
    /// Device serial, empty when the vendor omits it.
    #[serde(default)]
    pub serial_number: String,
    /// Longitude.
    pub lng: f64,
    /// Latitude.
    pub lat: f64,
}

// ============================================================================
// Wallpaper & Credit
// ============================================================================

/// A wallpaper registered for a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallpaper {
    /// Vendor wallpaper id.
    #[serde(default)]
    pub id: i64,
    /// Public URL of the image.
    #[serde(default)]
    pub url: String,
}

/// Remaining management credit for the operating merchant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    /// Device-equivalents of balance remaining.
    pub credit: f64,
}

impl Credit {
    /// The neutral zero-credit value used by vendors without a credit API.
    pub fn zero() -> Self {
        Self { credit: 0.0 }
    }
}

// ============================================================================
// Command Receipt
// ============================================================================

/// Result of an asynchronous vendor command (lost-mode toggles).
///
/// Vendors that track issued commands report an id the caller can poll;
/// vendors that do not leave it unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReceipt {
    /// Whether the vendor accepted the command.
    pub accepted: bool,
    /// Vendor command id, when the backend tracks the command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_id: Option<i64>,
}

impl CommandReceipt {
    /// An accepted command, optionally with the vendor's tracking id.
    pub fn accepted(command_id: Option<i64>) -> Self {
        Self {
            accepted: true,
            command_id,
        }
    }

    /// The neutral failure value: not accepted, no command id.
    pub fn rejected() -> Self {
        Self {
            accepted: false,
            command_id: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_defaults_are_neutral() {
        let device = Device::default();
        assert_eq!(device.id, 0);
        assert_eq!(device.device_status, DeviceStatus::Unregulated);
        assert!(device.serial_number.is_empty());
        assert!(device.command_content_list.is_none());
    }

    #[test]
    fn test_device_parses_vendor_camel_case() {
        let json = r#"{
            "id": 42,
            "deviceStatus": 1,
            "serialNumber": "F2LXK",
            "httpProxyStatus": 1,
            "phoneModel": "iPhone 12"
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, 42);
        assert_eq!(device.device_status, DeviceStatus::Supervised);
        assert_eq!(device.http_proxy_status, 1);
        assert!(device.description.is_empty());
    }

    #[test]
    fn test_receipt_helpers() {
        assert_eq!(
            CommandReceipt::rejected(),
            CommandReceipt {
                accepted: false,
                command_id: None
            }
        );
        let receipt = CommandReceipt::accepted(Some(7));
        assert!(receipt.accepted);
        assert_eq!(receipt.command_id, Some(7));
    }

    #[test]
    fn test_location_parses_camel_case() {
        let json = r#"{"deviceId": 3, "serialNumber": "S", "lng": 121.47, "lat": 31.23}"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.device_id, 3);
        assert_eq!(location.lat, 31.23);
    }
}
