//! Vendor brand and device status codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MdmError;

// ============================================================================
// Brand
// ============================================================================

/// Tag identifying which vendor backend a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    /// ishalou Apple MDM.
    #[serde(rename = "apple")]
    Apple,
    /// Generic Android MDM (headwind-style).
    #[serde(rename = "android")]
    Android,
    /// seekdream Android MDM.
    #[serde(rename = "android-seekdream")]
    AndroidSeekdream,
}

impl Brand {
    /// Returns the wire/CLI name for this brand.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Android => "android",
            Self::AndroidSeekdream => "android-seekdream",
        }
    }

    /// Returns all known brands.
    pub fn all() -> &'static [Brand] {
        &[Self::Apple, Self::Android, Self::AndroidSeekdream]
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brand {
    type Err = MdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apple" => Ok(Self::Apple),
            "android" => Ok(Self::Android),
            "android-seekdream" => Ok(Self::AndroidSeekdream),
            _ => Err(MdmError::InvalidBrand),
        }
    }
}

// ============================================================================
// Device Status
// ============================================================================

/// Device regulation status, serialized as the vendor's numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DeviceStatus {
    /// Enrolled but not yet supervised.
    Unregulated,
    /// Under full remote management.
    Supervised,
    /// Management removed.
    Deregulated,
    /// Locked via lost mode.
    LostLocked,
    /// Locked via the rent/hide-app channel.
    RentLocked,
}

impl DeviceStatus {
    /// Returns the vendor numeric code.
    pub fn code(&self) -> u8 {
        match self {
            Self::Unregulated => 0,
            Self::Supervised => 1,
            Self::Deregulated => 2,
            Self::LostLocked => 3,
            Self::RentLocked => 4,
        }
    }
}

impl From<DeviceStatus> for u8 {
    fn from(status: DeviceStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for DeviceStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Unregulated),
            1 => Ok(Self::Supervised),
            2 => Ok(Self::Deregulated),
            3 => Ok(Self::LostLocked),
            4 => Ok(Self::RentLocked),
            other => Err(format!("unknown device status code: {other}")),
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
    fn test_brand_roundtrip() {
        for brand in Brand::all() {
            let parsed: Brand = brand.as_str().parse().unwrap();
            assert_eq!(parsed, *brand);
        }
    }

    #[test]
    fn test_brand_parse_rejects_unknown() {
        let err = "ios".parse::<Brand>().unwrap_err();
        assert_eq!(err.to_string(), "invalid_brand");
    }

    #[test]
    fn test_brand_serde_forms() {
        assert_eq!(
            serde_json::to_string(&Brand::AndroidSeekdream).unwrap(),
            r#""android-seekdream""#
        );
        let parsed: Brand = serde_json::from_str(r#""apple""#).unwrap();
        assert_eq!(parsed, Brand::Apple);
    }

    #[test]
    fn test_device_status_codes() {
        assert_eq!(DeviceStatus::Unregulated.code(), 0);
        assert_eq!(DeviceStatus::Supervised.code(), 1);
        assert_eq!(DeviceStatus::RentLocked.code(), 4);
    }

    #[test]
    fn test_device_status_serde_numeric() {
        let json = serde_json::to_string(&DeviceStatus::LostLocked).unwrap();
        assert_eq!(json, "3");
        let parsed: DeviceStatus = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, DeviceStatus::Unregulated);
    }

    #[test]
    fn test_device_status_rejects_unknown_code() {
        assert!(serde_json::from_str::<DeviceStatus>("9").is_err());
    }
}
