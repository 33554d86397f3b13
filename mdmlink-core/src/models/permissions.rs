//! Device restriction switches.

use serde::{Deserialize, Serialize};

/// String-boolean serialization: the Apple vendor's restriction API takes
/// `"true"` / `"false"` strings, not JSON booleans.
mod bool_string {
    use serde::de::{self, Deserializer};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw: String = serde::Deserialize::deserialize(deserializer)?;
        match raw.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::custom(format!(
                "expected \"true\" or \"false\", got {other:?}"
            ))),
        }
    }
}

/// Optional string-boolean, omitted from the wire form when unset.
mod opt_bool_string {
    use serde::de::Deserializer;
    use serde::{Deserialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::bool_string::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        let raw: Option<String> = Deserialize::deserialize(deserializer)?;
        match raw.as_deref() {
            None => Ok(None),
            Some("true") => Ok(Some(true)),
            Some("false") => Ok(Some(false)),
            Some(other) => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", got {other:?}"
            ))),
        }
    }
}

/// Restriction switches pushed to a supervised device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    /// Lock the device clock to network time.
    #[serde(with = "bool_string")]
    pub force_automatic_date_and_time: bool,
    /// Allow the Find My service.
    #[serde(with = "bool_string")]
    pub allow_find_my_device: bool,
    /// Allow manual configuration-profile installs.
    #[serde(with = "bool_string", rename = "allowUIConfigurationProfileInstallation")]
    pub allow_ui_configuration_profile_installation: bool,
    /// Allow trusting enterprise app certificates.
    #[serde(with = "bool_string")]
    pub allow_enterprise_app_trust: bool,
    /// Allow creating VPN configurations.
    #[serde(with = "bool_string", rename = "allowVPNCreation")]
    pub allow_vpn_creation: bool,
    /// Force Wi-Fi to stay powered on.
    #[serde(with = "bool_string", rename = "forceWiFiPowerOn")]
    pub force_wifi_power_on: bool,
    /// Allow account modification; not accepted by every firmware.
    #[serde(
        with = "opt_bool_string",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_account_modification: Option<bool>,
}

impl Permissions {
    /// The fixed restriction set pushed right after supervision enablement.
    pub fn supervision_defaults() -> Self {
        Self {
            force_automatic_date_and_time: true,
            allow_find_my_device: true,
            allow_ui_configuration_profile_installation: true,
            allow_enterprise_app_trust: true,
            allow_vpn_creation: true,
            force_wifi_power_on: false,
            allow_account_modification: Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_string_booleans() {
        let perms = Permissions::supervision_defaults();
        let json = serde_json::to_string(&perms).unwrap();
        assert!(json.contains(r#""forceAutomaticDateAndTime":"true""#));
        assert!(json.contains(r#""forceWiFiPowerOn":"false""#));
        assert!(json.contains(r#""allowAccountModification":"false""#));
        assert!(!json.contains("true,"));
    }

    #[test]
    fn test_roundtrip() {
        let perms = Permissions::supervision_defaults();
        let json = serde_json::to_string(&perms).unwrap();
        let parsed: Permissions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, perms);
    }

    #[test]
    fn test_rejects_bare_booleans() {
        let json = r#"{
            "forceAutomaticDateAndTime": true,
            "allowFindMyDevice": "false",
            "allowUIConfigurationProfileInstallation": "true",
            "allowEnterpriseAppTrust": "false",
            "allowVPNCreation": "true",
            "forceWiFiPowerOn": "false"
        }"#;
        assert!(serde_json::from_str::<Permissions>(json).is_err());
    }

    #[test]
    fn test_optional_switch_omitted() {
        let mut perms = Permissions::supervision_defaults();
        perms.allow_account_modification = None;
        let json = serde_json::to_string(&perms).unwrap();
        assert!(!json.contains("allowAccountModification"));
    }
}
