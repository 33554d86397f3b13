//! ishalou wire types.

use serde::{Deserialize, Serialize};

use mdmlink_core::{Device, DeviceDetail, DeviceQuery, Location};

// ============================================================================
// Endpoints
// ============================================================================

/// Mobile-code request, first leg of the login flow.
pub const LOGIN_CODE_ENDPOINT: &str = "/auth/jwt/app/login/mobileCode";
/// Token exchange, second leg of the login flow.
pub const LOGIN_TOKEN_ENDPOINT: &str = "/auth/jwt/user/mobile/token";
/// Paged device search.
pub const DEVICE_QUERY_ENDPOINT: &str = "/mdm/saas/device/queryPage";
/// Per-device hardware identifiers.
pub const DEVICE_DETAIL_ENDPOINT: &str = "/mdm/saas/deviceInfo/getByDeviceId";
/// Passcode escrow key.
pub const ESCROW_KEY_ENDPOINT: &str = "/mdm/saas/device/getEscrowKey";
/// Lost-mode lock.
pub const SET_LOSE_ENDPOINT: &str = "/mdm/saas/device/setLose";
/// Lost-mode release.
pub const RENEW_REGULATION_ENDPOINT: &str = "/mdm/saas/device/renewRegulation";
/// Location re-sync.
pub const LOCATION_SYNC_ENDPOINT: &str = "/mdm/saas/deviceLocationNewest/deviceLocationSync";
/// Paged location history.
pub const LOCATION_QUERY_ENDPOINT: &str = "/mdm/saas/deviceLocationRecord/queryPage";
/// Supervision order confirmation.
pub const VERIFY_CONFIRM_ENDPOINT: &str = "/check/saas/mdm/order/verifyConfirm";
/// Supervision order payment.
pub const PAY_BALANCE_ENDPOINT: &str = "/check/saas/mdm/order/payBalance";
/// Unenroll.
pub const DEVICE_UNLOCK_ENDPOINT: &str = "/mdm/saas/device/deviceUnLock";
/// Passcode clear.
pub const CLEAR_PASSCODE_ENDPOINT: &str = "/mdm/saas/device/setClearPasscode";
/// Rent lock (hides the management app).
pub const SET_RENT_ENDPOINT: &str = "/mdm/saas/device/setRent";
/// Restriction push.
pub const FUNCTION_RESTRICT_ENDPOINT: &str = "/mdm/saas/device/setFunctionRestrict";
/// Managed proxy removal.
pub const DELETE_PROXY_ENDPOINT: &str = "/mdm/saas/device/deleteHttpProxy";
/// Managed proxy install.
pub const ENABLE_PROXY_ENDPOINT: &str = "/mdm/saas/device/enableHttpProxy";
/// Wallpaper upload (vendor spelling).
pub const WALLPAPER_SAVE_ENDPOINT: &str = "/mdm/saas/wallpager/save";
/// Wallpaper changeability toggle (vendor spelling).
pub const WALLPAPER_CHANGE_ENDPOINT: &str = "/mdm/saas/wallpager/change";
/// Per-device management unit price.
pub const MERCHANT_PRICE_ENDPOINT: &str = "/merchant/saas/merchant/getMerchantMdmPrice";
/// Merchant recharge balance.
pub const MERCHANT_BALANCE_ENDPOINT: &str = "/merchant/saas/mdmBalance/getByMerchantId";
/// Per-device operation log.
pub const OPERATION_LOG_ENDPOINT: &str = "/mdm/saas/deviceOperationLog/getDeviceOperationLogList";
/// Tracked command lookup.
pub const GET_COMMAND_ENDPOINT: &str = "/mdm/saas/command/getCommand";

// ============================================================================
// Response Envelopes
// ============================================================================

/// Standard ishalou response envelope. Success is signalled by a
/// payload-embedded `status == 200`, not the HTTP status line.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Payload-embedded status code.
    #[serde(default)]
    pub status: Option<i64>,
    /// Payload data, shape varies per endpoint.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// The vendor's success marker.
    pub fn is_ok(&self) -> bool {
        self.status == Some(200)
    }
}

/// Login token exchange response.
#[derive(Debug, Deserialize)]
pub struct LoginEnvelope {
    /// The issued session token.
    #[serde(default)]
    pub data: Option<String>,
}

/// Paged device rows.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceRows {
    /// Matching devices, canonical shape on the wire.
    #[serde(default)]
    pub rows: Vec<Device>,
}

/// Paged location rows.
#[derive(Debug, Default, Deserialize)]
pub struct LocationRows {
    /// Location records, newest ordering as the vendor defines it.
    #[serde(default)]
    pub rows: Vec<Location>,
}

/// Escrow key payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub struct EscrowKeyData {
    /// The recovery key, when the device has one escrowed.
    #[serde(default)]
    pub escrow_key: Option<String>,
}

/// Merchant balance payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub struct BalanceData {
    /// Recharge balance in vendor currency units.
    #[serde(default)]
    pub recharge_balance: f64,
}

/// Paged operation-log rows.
#[derive(Debug, Default, Deserialize)]
pub struct OperationLogRows {
    /// Log entries, newest first as the vendor defines it.
    #[serde(default)]
    pub rows: Vec<OperationLogRow>,
}

/// One operation-log entry; only tracked commands carry an id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLogRow {
    /// Tracked command id, absent for untracked operations.
    #[serde(default)]
    pub command_id: Option<i64>,
}

/// Command-tracking payload returned by lost-mode toggles and the rent
/// lock.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub struct CommandData {
    /// Vendor command id, when the backend tracks the command.
    #[serde(default)]
    pub command_id: Option<i64>,
}

/// Device detail envelope payload is the canonical shape on the wire.
pub type DeviceDetailData = DeviceDetail;

// ============================================================================
// Request Payloads
// ============================================================================

/// Paged device search request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQueryRequest {
    /// Tenant filter: application id when searching without a serial,
    /// empty otherwise.
    pub possessor: String,
    /// Unused filter, always empty.
    pub use_status_list: Vec<i64>,
    /// Unused filter, always empty.
    pub assign_status_list: Vec<i64>,
    /// Status filter covering every managed state.
    pub device_status_list: Vec<i64>,
    /// Unused filter, always empty.
    pub last_online_value_list: Vec<i64>,
    /// Serial number search term.
    pub search_content: String,
    /// Page size.
    pub limit: u32,
    /// Page number.
    pub page: u32,
    /// Unused date filter.
    pub start_date_value: String,
    /// Unused date filter.
    pub end_date_value: String,
}

impl DeviceQueryRequest {
    /// Builds the search request for a device query: serial-first, falling
    /// back to the application id when no serial is known.
    pub fn for_query(query: &DeviceQuery) -> Self {
        let possessor = if query.serial_number.is_empty() {
            query.application_id.clone()
        } else {
            String::new()
        };
        Self {
            possessor,
            use_status_list: Vec::new(),
            assign_status_list: Vec::new(),
            device_status_list: vec![0, 1, 3, 4],
            last_online_value_list: Vec::new(),
            search_content: query.serial_number.clone(),
            limit: 10,
            page: 1,
            start_date_value: String::new(),
            end_date_value: String::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mdmlink_core::Brand;

    #[test]
    fn test_envelope_success_marker() {
        let ok: Envelope<CommandData> = serde_json::from_str(r#"{"status": 200}"#).unwrap();
        assert!(ok.is_ok());
        let denied: Envelope<CommandData> =
            serde_json::from_str(r#"{"status": 403, "data": null}"#).unwrap();
        assert!(!denied.is_ok());
        let missing: Envelope<CommandData> = serde_json::from_str("{}").unwrap();
        assert!(!missing.is_ok());
    }

    #[test]
    fn test_device_query_request_prefers_serial() {
        let query = DeviceQuery::new(Brand::Apple, "F2LXK", "app-7");
        let request = DeviceQueryRequest::for_query(&query);
        assert_eq!(request.search_content, "F2LXK");
        assert!(request.possessor.is_empty());
        assert_eq!(request.device_status_list, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_device_query_request_falls_back_to_application() {
        let query = DeviceQuery::new(Brand::Apple, "", "app-7");
        let request = DeviceQueryRequest::for_query(&query);
        assert_eq!(request.possessor, "app-7");
        assert!(request.search_content.is_empty());
    }

    #[test]
    fn test_device_query_request_wire_keys() {
        let query = DeviceQuery::new(Brand::Apple, "S", "A");
        let json = serde_json::to_string(&DeviceQueryRequest::for_query(&query)).unwrap();
        for key in [
            "possessor",
            "useStatusList",
            "assignStatusList",
            "deviceStatusList",
            "lastOnlineValueList",
            "searchContent",
            "limit",
            "page",
            "startDateValue",
            "endDateValue",
        ] {
            assert!(json.contains(key), "missing wire key {key}");
        }
    }

    #[test]
    fn test_device_rows_take_first() {
        let json = r#"{
            "status": 200,
            "data": {"rows": [
                {"id": 11, "deviceStatus": 0, "serialNumber": "A"},
                {"id": 12, "deviceStatus": 1, "serialNumber": "B"}
            ]}
        }"#;
        let envelope: Envelope<DeviceRows> = serde_json::from_str(json).unwrap();
        let device = envelope.data.unwrap().rows.into_iter().next().unwrap();
        assert_eq!(device.id, 11);
    }

    #[test]
    fn test_escrow_key_payload() {
        let json = r#"{"status": 200, "data": {"escrowKey": "ABCD-EFGH"}}"#;
        let envelope: Envelope<EscrowKeyData> = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.data.unwrap().escrow_key.as_deref(),
            Some("ABCD-EFGH")
        );
    }

    #[test]
    fn test_command_data_optional_id() {
        let with_id: Envelope<CommandData> =
            serde_json::from_str(r#"{"status": 200, "data": {"commandId": 99}}"#).unwrap();
        assert_eq!(with_id.data.unwrap().command_id, Some(99));
        let without: Envelope<CommandData> =
            serde_json::from_str(r#"{"status": 200, "data": {}}"#).unwrap();
        assert_eq!(without.data.unwrap().command_id, None);
    }
}
