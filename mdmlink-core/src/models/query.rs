//! Caller-supplied device identification.

use serde::{Deserialize, Serialize};

use super::brand::Brand;

/// Identification of a target device.
///
/// An adapter takes ownership of the query at construction. The Apple-family
/// adapter backfills `mdm_id` after a successful device lookup, so later
/// operations on the same instance can omit it; callers observe the
/// backfilled id through `Mdm::query()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceQuery {
    /// Which vendor backend this device belongs to.
    pub brand: Brand,
    /// Vendor-internal device id, when already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdm_id: Option<i64>,
    /// Device serial number.
    pub serial_number: String,
    /// Application/tenant identifier.
    pub application_id: String,
    /// Merchant identifier, required for credit lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
}

impl DeviceQuery {
    /// Creates a query for the given brand, serial, and application id.
    pub fn new(
        brand: Brand,
        serial_number: impl Into<String>,
        application_id: impl Into<String>,
    ) -> Self {
        Self {
            brand,
            mdm_id: None,
            serial_number: serial_number.into(),
            application_id: application_id.into(),
            merchant_id: None,
        }
    }

    /// Sets the vendor-internal device id.
    pub fn with_mdm_id(mut self, mdm_id: i64) -> Self {
        self.mdm_id = Some(mdm_id);
        self
    }

    /// Sets the merchant identifier.
    pub fn with_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builders() {
        let query = DeviceQuery::new(Brand::AndroidSeekdream, "ABC123", "app-1")
            .with_merchant_id("M1");
        assert_eq!(query.serial_number, "ABC123");
        assert_eq!(query.merchant_id.as_deref(), Some("M1"));
        assert!(query.mdm_id.is_none());
    }

    #[test]
    fn test_query_serde_omits_absent_ids() {
        let query = DeviceQuery::new(Brand::Apple, "S1", "app-1");
        let json = serde_json::to_string(&query).unwrap();
        assert!(!json.contains("mdm_id"));
        assert!(!json.contains("merchant_id"));
    }
}
