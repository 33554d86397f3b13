//! seekdream wire types.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use mdmlink_core::{Device, DeviceStatus, Wallpaper};

// ============================================================================
// Endpoints
// ============================================================================

/// Agent login.
pub const LOGIN_ENDPOINT: &str = "/user/login";
/// Serial-keyed device list.
pub const DEVICE_LIST_ENDPOINT: &str = "/google/getDeviceList";
/// Lost-mode lock.
pub const LOCK_ENDPOINT: &str = "/google/lock";
/// Lost-mode release.
pub const UNLOCK_ENDPOINT: &str = "/google/unlock";
/// Location history.
pub const LOCATIONS_ENDPOINT: &str = "/google/getLocations";
/// Unenroll with second factor.
pub const DISOWN_ENDPOINT: &str = "/google/disown";
/// Passcode clear.
pub const CLEAR_PASSWORD_ENDPOINT: &str = "/google/clearPassword";
/// Wallpaper push.
pub const PUSH_WALLPAPER_ENDPOINT: &str = "/google/pushWallpaper";
/// Merchant wallpaper catalogue.
pub const WALLPAPER_LIST_ENDPOINT: &str = "/user/wallpaper";
/// Remote reboot.
pub const REBOOT_ENDPOINT: &str = "/google/reboot";
/// Find-my-device sound.
pub const PLAY_SOUND_ENDPOINT: &str = "/google/playSound";

/// Fixed paging for serial-keyed list endpoints.
pub const LIST_PAGING: &[(&str, &str)] = &[("current", "1"), ("pageSize", "20")];

/// Fixed paging for the wallpaper catalogue.
pub const WALLPAPER_PAGING: &[(&str, &str)] = &[("current", "1"), ("pageSize", "8")];

// ============================================================================
// Login & Acks
// ============================================================================

/// Agent login response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// The issued session token.
    #[serde(default)]
    pub token: Option<String>,
}

/// Command acknowledgement envelope. Success is the payload-embedded
/// `code == 200`; the HTTP status line is not consulted here.
#[derive(Debug, Deserialize)]
pub struct CodeEnvelope {
    /// Payload-embedded result code.
    #[serde(default)]
    pub code: Option<i64>,
}

impl CodeEnvelope {
    /// The vendor's success marker.
    pub fn is_ok(&self) -> bool {
        self.code == Some(200)
    }
}

// ============================================================================
// Device List
// ============================================================================

/// Device-list envelope: `data.lists`.
#[derive(Debug, Deserialize)]
pub struct DeviceListEnvelope {
    /// List payload.
    #[serde(default)]
    pub data: Option<DeviceLists>,
}

/// Paged device list; the wire key is `lists`.
#[derive(Debug, Deserialize)]
pub struct DeviceLists {
    /// Matching devices.
    #[serde(default)]
    pub lists: Vec<SeekdreamDevice>,
}

/// A device as seekdream reports it.
#[derive(Debug, Deserialize)]
pub struct SeekdreamDevice {
    /// Vendor-internal device id.
    #[serde(default)]
    pub device_id: i64,
    /// Regulation status code.
    #[serde(default)]
    pub status_flag: Option<u8>,
    /// Device-check record carrying the hardware block.
    #[serde(default)]
    pub dc_info: Option<DcInfo>,
    /// Enrollment time, epoch milliseconds.
    #[serde(default)]
    pub add_time: Option<i64>,
    /// Owning merchant.
    #[serde(default, deserialize_with = "opt_stringly")]
    pub merchant_id: Option<String>,
    /// IMEI, when reported.
    #[serde(default)]
    pub imei: Option<String>,
}

/// Device-check record.
#[derive(Debug, Default, Deserialize)]
pub struct DcInfo {
    /// Nested hardware record.
    #[serde(default, rename = "hardwareInfo")]
    pub hardware_info: Option<HardwareInfo>,
}

/// Nested hardware record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareInfo {
    /// Hardware serial.
    #[serde(default)]
    pub serial_number: String,
    /// Hardware model name.
    #[serde(default)]
    pub model: String,
}

impl SeekdreamDevice {
    /// Reshapes into the canonical Device. An unknown status code falls
    /// back to supervised, matching how the backend treats enrolled
    /// devices; unreported fields stay neutral.
    pub fn into_canonical(self) -> Device {
        let hardware = self
            .dc_info
            .and_then(|dc| dc.hardware_info)
            .unwrap_or_default();
        Device {
            id: self.device_id,
            device_status: self
                .status_flag
                .and_then(|code| DeviceStatus::try_from(code).ok())
                .unwrap_or(DeviceStatus::Supervised),
            serial_number: hardware.serial_number,
            phone_model: hardware.model,
            activation_lock_status: 1,
            create_time: self.add_time.map(format_add_time).unwrap_or_default(),
            merchant_id: self.merchant_id,
            imei: self.imei,
            ..Device::default()
        }
    }
}

/// Formats an epoch-milliseconds enrollment time as `YYYYMMDDHHmmss`.
pub fn format_add_time(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y%m%d%H%M%S").to_string())
        .unwrap_or_default()
}

/// Accepts an id field as either a JSON string or a number.
fn opt_stringly<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(value) => value.to_string(),
    }))
}

// ============================================================================
// Locations
// ============================================================================

/// Location-history envelope: `data.list[].location`.
#[derive(Debug, Deserialize)]
pub struct LocationsEnvelope {
    /// List payload.
    #[serde(default)]
    pub data: Option<LocationList>,
}

/// Paged location records.
#[derive(Debug, Deserialize)]
pub struct LocationList {
    /// Recorded positions, vendor order.
    #[serde(default)]
    pub list: Vec<LocationRecord>,
}

/// One location record.
#[derive(Debug, Deserialize)]
pub struct LocationRecord {
    /// The coordinate pair.
    pub location: RawCoordinates,
}

/// A coordinate pair as the vendor sends it: strings on the wire, numeric
/// in the canonical form.
#[derive(Debug, Deserialize)]
pub struct RawCoordinates {
    /// Latitude.
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    /// Longitude.
    #[serde(deserialize_with = "coordinate")]
    pub lng: f64,
}

/// Accepts a coordinate as either a JSON string or a number.
fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid coordinate: {text:?}"))),
    }
}

// ============================================================================
// Wallpapers
// ============================================================================

/// Wallpaper-catalogue envelope: `data.list`.
#[derive(Debug, Deserialize)]
pub struct WallpaperListEnvelope {
    /// List payload.
    #[serde(default)]
    pub data: Option<WallpaperList>,
}

/// Paged wallpaper rows.
#[derive(Debug, Deserialize)]
pub struct WallpaperList {
    /// Registered wallpapers.
    #[serde(default)]
    pub list: Vec<WallpaperRow>,
}

/// One catalogue row.
#[derive(Debug, Deserialize)]
pub struct WallpaperRow {
    /// Wallpaper id.
    #[serde(default)]
    pub wp_id: i64,
    /// Image URL.
    #[serde(default)]
    pub wp_url: String,
}

impl WallpaperRow {
    /// Reshapes into the canonical Wallpaper.
    pub fn into_canonical(self) -> Wallpaper {
        Wallpaper {
            id: self.wp_id,
            url: self.wp_url,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Wallpaper push request.
#[derive(Debug, Serialize)]
pub struct PushWallpaperRequest<'a> {
    /// Target device serial.
    pub serial: &'a str,
    /// Push type, fixed.
    pub wp_type: &'a str,
    /// Wallpaper id to push, when selecting from the catalogue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wp_id: Option<i64>,
    /// Whether the user may change the wallpaper afterwards, `"1"`/`"0"`.
    pub allowed: &'a str,
    /// Operating merchant.
    pub merchant_id: &'a str,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_list_maps_nested_hardware_fields() {
        let json = r#"{
            "data": {"lists": [{
                "device_id": 310,
                "status_flag": 3,
                "dc_info": {"hardwareInfo": {"serialNumber": "ABC123", "model": "Pixel 6"}},
                "add_time": 1700000000000,
                "merchant_id": "M1",
                "imei": "860000000000001"
            }]}
        }"#;
        let envelope: DeviceListEnvelope = serde_json::from_str(json).unwrap();
        let device = envelope
            .data
            .unwrap()
            .lists
            .into_iter()
            .next()
            .unwrap()
            .into_canonical();
        assert_eq!(device.id, 310);
        assert_eq!(device.device_status, DeviceStatus::LostLocked);
        assert_eq!(device.serial_number, "ABC123");
        assert_eq!(device.phone_model, "Pixel 6");
        assert_eq!(device.create_time, "20231114221320");
        assert_eq!(device.merchant_id.as_deref(), Some("M1"));
        assert_eq!(device.imei.as_deref(), Some("860000000000001"));
    }

    #[test]
    fn test_numeric_merchant_id_becomes_text() {
        let json = r#"{"device_id": 1, "merchant_id": 77}"#;
        let device: SeekdreamDevice = serde_json::from_str(json).unwrap();
        assert_eq!(device.merchant_id.as_deref(), Some("77"));
    }

    #[test]
    fn test_empty_list_parses() {
        let envelope: DeviceListEnvelope =
            serde_json::from_str(r#"{"data": {"lists": []}}"#).unwrap();
        assert!(envelope.data.unwrap().lists.is_empty());
    }

    #[test]
    fn test_unknown_status_flag_falls_back_to_supervised() {
        let json = r#"{"device_id": 1, "status_flag": 99}"#;
        let device: SeekdreamDevice = serde_json::from_str(json).unwrap();
        assert_eq!(
            device.into_canonical().device_status,
            DeviceStatus::Supervised
        );
    }

    #[test]
    fn test_code_marker_is_exact() {
        let ok: CodeEnvelope = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert!(ok.is_ok());
        let denied: CodeEnvelope = serde_json::from_str(r#"{"code": 403}"#).unwrap();
        assert!(!denied.is_ok());
        let missing: CodeEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!missing.is_ok());
    }

    #[test]
    fn test_string_coordinates_parse_numeric() {
        let json = r#"{
            "data": {"list": [
                {"location": {"lat": "31.2304", "lng": "121.4737"}},
                {"location": {"lat": 30.5, "lng": 120.25}}
            ]}
        }"#;
        let envelope: LocationsEnvelope = serde_json::from_str(json).unwrap();
        let list = envelope.data.unwrap().list;
        assert_eq!(list[0].location.lat, 31.2304);
        assert_eq!(list[0].location.lng, 121.4737);
        assert_eq!(list[1].location.lat, 30.5);
    }

    #[test]
    fn test_malformed_coordinate_is_an_error() {
        let json = r#"{"location": {"lat": "north", "lng": "121"}}"#;
        assert!(serde_json::from_str::<LocationRecord>(json).is_err());
    }

    #[test]
    fn test_wallpaper_rows_map_wire_keys() {
        let json = r#"{"data": {"list": [
            {"wp_id": 4, "wp_url": "https://cdn.example.com/w4.png"}
        ]}}"#;
        let envelope: WallpaperListEnvelope = serde_json::from_str(json).unwrap();
        let wallpaper = envelope
            .data
            .unwrap()
            .list
            .into_iter()
            .next()
            .unwrap()
            .into_canonical();
        assert_eq!(wallpaper.id, 4);
        assert_eq!(wallpaper.url, "https://cdn.example.com/w4.png");
    }

    #[test]
    fn test_push_wallpaper_request_omits_absent_id() {
        let request = PushWallpaperRequest {
            serial: "S",
            wp_type: "3",
            wp_id: None,
            allowed: "0",
            merchant_id: "M1",
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("wp_id"));
        assert!(json.contains(r#""allowed":"0""#));

        let request = PushWallpaperRequest {
            wp_id: Some(9),
            ..request
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""wp_id":9"#));
    }
}
