//! Parser edge case and error handling tests.
//!
//! These tests verify vendor payload parsing with malformed, partial, or
//! edge case inputs.

#[cfg(test)]
mod ishalou_parser_edge_tests {
    use crate::ishalou::api::{DeviceRows, Envelope, LocationRows, OperationLogRows};
    use mdmlink_core::DeviceStatus;

    #[test]
    fn test_empty_object_parses_as_unsuccessful() {
        let envelope: Envelope<DeviceRows> = serde_json::from_str("{}").unwrap();
        assert!(!envelope.is_ok());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_null_data_parses() {
        let envelope: Envelope<DeviceRows> =
            serde_json::from_str(r#"{"status": 200, "data": null}"#).unwrap();
        assert!(envelope.is_ok());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_missing_rows_defaults_empty() {
        let envelope: Envelope<DeviceRows> =
            serde_json::from_str(r#"{"status": 200, "data": {}}"#).unwrap();
        assert!(envelope.data.unwrap().rows.is_empty());
    }

    #[test]
    fn test_device_row_with_unknown_status_code_is_rejected() {
        let json = r#"{"status": 200, "data": {"rows": [
            {"id": 1, "deviceStatus": 7, "serialNumber": "X"}
        ]}}"#;
        assert!(serde_json::from_str::<Envelope<DeviceRows>>(json).is_err());
    }

    #[test]
    fn test_location_rows_preserve_vendor_order() {
        let json = r#"{"status": 200, "data": {"rows": [
            {"deviceId": 9, "serialNumber": "S", "lng": 1.0, "lat": 2.0},
            {"deviceId": 9, "serialNumber": "S", "lng": 3.0, "lat": 4.0}
        ]}}"#;
        let envelope: Envelope<LocationRows> = serde_json::from_str(json).unwrap();
        let rows = envelope.data.unwrap().rows;
        assert_eq!(rows[0].lng, 1.0);
        assert_eq!(rows[1].lng, 3.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        for raw in ["{", "not json", r#"{"status": }"#] {
            assert!(
                serde_json::from_str::<Envelope<DeviceRows>>(raw).is_err(),
                "should fail for: {raw}"
            );
        }
    }

    #[test]
    fn test_operation_log_rows_keep_untracked_entries_idless() {
        let json = r#"{"status": 200, "data": {"rows": [
            {"commandId": 44, "operation": "EnableLostMode"},
            {"commandId": null, "operation": "Remark"}
        ]}}"#;
        let envelope: Envelope<OperationLogRows> = serde_json::from_str(json).unwrap();
        let rows = envelope.data.unwrap().rows;
        assert_eq!(rows[0].command_id, Some(44));
        assert_eq!(rows[1].command_id, None);
    }

    #[test]
    fn test_device_status_codes_cover_lock_states() {
        let json = r#"{"status": 200, "data": {"rows": [
            {"id": 1, "deviceStatus": 3, "serialNumber": "A"},
            {"id": 2, "deviceStatus": 4, "serialNumber": "B"}
        ]}}"#;
        let envelope: Envelope<DeviceRows> = serde_json::from_str(json).unwrap();
        let rows = envelope.data.unwrap().rows;
        assert_eq!(rows[0].device_status, DeviceStatus::LostLocked);
        assert_eq!(rows[1].device_status, DeviceStatus::RentLocked);
    }
}

#[cfg(test)]
mod headwind_parser_edge_tests {
    use crate::headwind::api::{LocationEnvelope, SearchEnvelope, StatusEnvelope};

    #[test]
    fn test_search_envelope_without_devices() {
        let envelope: SearchEnvelope = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(envelope.data.unwrap().devices.is_none());
    }

    #[test]
    fn test_search_envelope_missing_data() {
        let envelope: SearchEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_device_without_enroll_time_maps_empty_create_time() {
        let json = r#"{"data": {"devices": {"items": [{"id": 5, "serial": "HW"}]}}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        let device = envelope
            .data
            .unwrap()
            .devices
            .unwrap()
            .items
            .into_iter()
            .next()
            .unwrap()
            .into_canonical();
        assert!(device.create_time.is_empty());
    }

    #[test]
    fn test_status_envelope_non_string_status_is_an_error() {
        assert!(serde_json::from_str::<StatusEnvelope>(r#"{"status": 200}"#).is_err());
    }

    #[test]
    fn test_location_uses_lon_field() {
        let json = r#"{"data": {"lat": 52.52, "lon": 13.40}}"#;
        let envelope: LocationEnvelope = serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.lon, 13.40);
        assert_eq!(data.lat, 52.52);
    }
}

#[cfg(test)]
mod seekdream_parser_edge_tests {
    use crate::seekdream::api::{CodeEnvelope, DeviceListEnvelope, LocationsEnvelope};

    #[test]
    fn test_missing_data_resolves_to_no_device() {
        let envelope: DeviceListEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_device_without_hardware_block_stays_neutral() {
        let json = r#"{"data": {"lists": [{"device_id": 8, "status_flag": 1}]}}"#;
        let envelope: DeviceListEnvelope = serde_json::from_str(json).unwrap();
        let device = envelope
            .data
            .unwrap()
            .lists
            .into_iter()
            .next()
            .unwrap()
            .into_canonical();
        assert_eq!(device.id, 8);
        assert!(device.serial_number.is_empty());
        assert!(device.phone_model.is_empty());
        assert!(device.merchant_id.is_none());
    }

    #[test]
    fn test_code_envelope_string_code_is_an_error() {
        assert!(serde_json::from_str::<CodeEnvelope>(r#"{"code": "OK"}"#).is_err());
    }

    #[test]
    fn test_locations_with_empty_list() {
        let envelope: LocationsEnvelope =
            serde_json::from_str(r#"{"data": {"list": []}}"#).unwrap();
        assert!(envelope.data.unwrap().list.is_empty());
    }

    #[test]
    fn test_locations_reject_records_without_coordinates() {
        let json = r#"{"data": {"list": [{"location": {"lat": "31.2"}}]}}"#;
        assert!(serde_json::from_str::<LocationsEnvelope>(json).is_err());
    }
}
