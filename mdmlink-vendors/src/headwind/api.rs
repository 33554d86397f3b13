//! headwind wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mdmlink_core::{Device, DeviceStatus};

// ============================================================================
// Endpoints
// ============================================================================

/// JWT login.
pub const LOGIN_ENDPOINT: &str = "/rest/public/jwt/login";
/// Device search.
pub const DEVICE_SEARCH_ENDPOINT: &str = "/rest/private/devices/search";
/// Push-message channel: lock, wallpaper, adb, factory all ride this.
pub const MESSAGING_ENDPOINT: &str = "/rest/plugins/messaging/private/send";
/// Latest recorded location, device id in the path.
pub const LOCATION_ENDPOINT: &str = "/location";

// ============================================================================
// Login
// ============================================================================

/// JWT login response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// The issued bearer token.
    #[serde(default)]
    pub id_token: Option<String>,
}

// ============================================================================
// Device Search
// ============================================================================

/// Device search request. The filters are fixed; only `value` varies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSearchRequest {
    /// Group filter, -1 for all.
    pub group_id: i64,
    /// Configuration filter, -1 for all.
    pub configuration_id: i64,
    /// Page number.
    pub page_num: u32,
    /// Page size.
    pub page_size: u32,
    /// Sort column, null on the wire.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_dir: String,
    /// Search term: the application/tenant id.
    pub value: String,
}

impl DeviceSearchRequest {
    /// Builds the fixed-filter search for an application id.
    pub fn for_application(application_id: &str) -> Self {
        Self {
            group_id: -1,
            configuration_id: -1,
            page_num: 1,
            page_size: 50,
            sort_by: None,
            sort_dir: "ASC".to_string(),
            value: application_id.to_string(),
        }
    }
}

/// Device search envelope: `data.devices.items`.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    /// Search payload.
    #[serde(default)]
    pub data: Option<SearchData>,
}

/// Search payload.
#[derive(Debug, Deserialize)]
pub struct SearchData {
    /// Paged device container.
    #[serde(default)]
    pub devices: Option<DeviceItems>,
}

/// Paged device container.
#[derive(Debug, Deserialize)]
pub struct DeviceItems {
    /// Matching devices.
    #[serde(default)]
    pub items: Vec<HeadwindDevice>,
}

/// A device as headwind reports it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadwindDevice {
    /// Vendor-internal device id.
    #[serde(default)]
    pub id: i64,
    /// Hardware serial.
    #[serde(default)]
    pub serial: Option<String>,
    /// Enrollment time, epoch milliseconds.
    #[serde(default)]
    pub enroll_time: Option<i64>,
}

impl HeadwindDevice {
    /// Reshapes into the canonical Device. headwind reports nothing about
    /// supervision or locks, so those fields carry the managed-and-locked
    /// defaults the backend enforces; everything else is neutral.
    pub fn into_canonical(self) -> Device {
        Device {
            id: self.id,
            device_status: DeviceStatus::Supervised,
            serial_number: self.serial.unwrap_or_default(),
            activation_lock_status: 1,
            create_time: self.enroll_time.map(format_enroll_time).unwrap_or_default(),
            ..Device::default()
        }
    }
}

/// Formats an epoch-milliseconds enrollment time as `YYYYMMDDHHmmss`.
pub fn format_enroll_time(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y%m%d%H%M%S").to_string())
        .unwrap_or_default()
}

// ============================================================================
// Push Messages
// ============================================================================

/// Command kinds carried over the push-message channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushKind {
    /// Screen lock / unlock.
    Lock,
    /// Wallpaper refresh.
    Wallpaper,
    /// ADB access toggle.
    Adb,
    /// Factory-reset protection toggle.
    Factory,
}

impl PushKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Wallpaper => "wallpaper",
            Self::Adb => "adb",
            Self::Factory => "factory",
        }
    }
}

/// Inner payload, JSON-encoded into the outer request's `message` field.
#[derive(Debug, Serialize)]
struct PushMessage<'a> {
    #[serde(rename = "deviceId")]
    device_id: i64,
    lock: bool,
    #[serde(rename = "type")]
    kind: &'a str,
    message: &'a str,
}

/// Push-message request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    /// Target scope, always a single device.
    pub scope: String,
    /// Device number: the application/tenant id.
    pub device_number: String,
    /// Unused group target.
    pub group_id: String,
    /// Unused configuration target.
    pub configuration_id: String,
    /// JSON-encoded inner payload.
    pub message: String,
    /// Wire message type.
    pub message_type: String,
}

impl PushRequest {
    /// Builds a push request for the device-number channel.
    pub fn new(device_number: &str, kind: PushKind, lock: bool) -> Result<Self, serde_json::Error> {
        let message = serde_json::to_string(&PushMessage {
            device_id: 1,
            lock,
            kind: kind.as_str(),
            message: "-",
        })?;
        Ok(Self {
            scope: "device".to_string(),
            device_number: device_number.to_string(),
            group_id: String::new(),
            configuration_id: String::new(),
            message,
            message_type: "1".to_string(),
        })
    }
}

// ============================================================================
// Acks & Locations
// ============================================================================

/// Plain acknowledgement envelope. Success is the string marker
/// `status == "OK"`.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    /// Payload-embedded status string.
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusEnvelope {
    /// The vendor's success marker.
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("OK")
    }
}

/// Latest-location envelope.
#[derive(Debug, Deserialize)]
pub struct LocationEnvelope {
    /// Location payload.
    #[serde(default)]
    pub data: Option<LocationData>,
}

/// A single recorded position. Longitude arrives as `lon`.
#[derive(Debug, Deserialize)]
pub struct LocationData {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_wire_form() {
        let request = DeviceSearchRequest::for_application("app-3");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""groupId":-1"#));
        assert!(json.contains(r#""sortBy":null"#));
        assert!(json.contains(r#""sortDir":"ASC""#));
        assert!(json.contains(r#""pageSize":50"#));
        assert!(json.contains(r#""value":"app-3""#));
    }

    #[test]
    fn test_push_request_encodes_inner_message() {
        let request = PushRequest::new("app-3", PushKind::Lock, true).unwrap();
        assert_eq!(request.scope, "device");
        assert_eq!(request.message_type, "1");
        let inner: serde_json::Value = serde_json::from_str(&request.message).unwrap();
        assert_eq!(inner["deviceId"], 1);
        assert_eq!(inner["lock"], true);
        assert_eq!(inner["type"], "lock");
        assert_eq!(inner["message"], "-");
    }

    #[test]
    fn test_push_kind_wire_names() {
        assert_eq!(PushKind::Factory.as_str(), "factory");
        assert_eq!(PushKind::Adb.as_str(), "adb");
        assert_eq!(PushKind::Wallpaper.as_str(), "wallpaper");
    }

    #[test]
    fn test_canonical_device_mapping() {
        let device = HeadwindDevice {
            id: 21,
            serial: Some("HW-SER".into()),
            enroll_time: Some(1_700_000_000_000),
        };
        let canonical = device.into_canonical();
        assert_eq!(canonical.id, 21);
        assert_eq!(canonical.serial_number, "HW-SER");
        assert_eq!(canonical.device_status, DeviceStatus::Supervised);
        assert_eq!(canonical.activation_lock_status, 1);
        assert_eq!(canonical.create_time, "20231114221320");
        assert!(canonical.phone_model.is_empty());
    }

    #[test]
    fn test_search_envelope_tolerates_empty_items() {
        let json = r#"{"data": {"devices": {"items": []}}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        let items = envelope.data.unwrap().devices.unwrap().items;
        assert!(items.is_empty());
    }

    #[test]
    fn test_status_marker_is_exact() {
        let ok: StatusEnvelope = serde_json::from_str(r#"{"status": "OK"}"#).unwrap();
        assert!(ok.is_ok());
        let no: StatusEnvelope = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(!no.is_ok());
        let missing: StatusEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!missing.is_ok());
    }
}
