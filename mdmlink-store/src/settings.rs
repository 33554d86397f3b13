//! Vendor settings loaded from environment configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;

/// Fallback unenroll second factor for vendors that take a configured
/// secret rather than a caller-supplied password.
const DEFAULT_SECOND_PASSWORD: &str = "123456";

/// Connection settings for one vendor backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSettings {
    /// Vendor base URL, no trailing slash.
    pub base_url: String,
    /// Login account.
    pub username: String,
    /// Login password (or mobile code, per vendor).
    pub password: String,
    /// Static API key sent alongside the session token, where required.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Second factor for unenrollment, where the vendor requires one.
    #[serde(default)]
    pub second_password: Option<String>,
}

impl VendorSettings {
    /// Creates settings with the mandatory fields.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            api_key: None,
            second_password: None,
        }
    }

    /// Sets the static API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the unenroll second factor.
    pub fn with_second_password(mut self, secret: impl Into<String>) -> Self {
        self.second_password = Some(secret.into());
        self
    }

    /// The unenroll second factor, falling back to the stock secret.
    pub fn second_password(&self) -> &str {
        self.second_password
            .as_deref()
            .unwrap_or(DEFAULT_SECOND_PASSWORD)
    }

    /// Loads `<prefix>_URL` / `_USERNAME` / `_PASSWORD` from the
    /// environment.
    ///
    /// Returns `Ok(None)` when the URL variable is absent (vendor not
    /// configured); a URL with missing credentials is an error.
    fn from_env(prefix: &str) -> Result<Option<Self>, StoreError> {
        let Some(base_url) = read_env(&format!("{prefix}_URL")) else {
            debug!(prefix, "vendor not configured");
            return Ok(None);
        };

        let username = require_env(&format!("{prefix}_USERNAME"))?;
        let password = require_env(&format!("{prefix}_PASSWORD"))?;

        Ok(Some(Self::new(base_url, username, password)))
    }
}

/// Settings for every vendor backend, keyed by adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// ishalou Apple MDM.
    pub ishalou: Option<VendorSettings>,
    /// Generic Android MDM.
    pub android: Option<VendorSettings>,
    /// seekdream Android MDM.
    pub seekdream: Option<VendorSettings>,
}

impl Settings {
    /// Loads all vendor settings from the process environment.
    ///
    /// Vendors whose `MDM_<VENDOR>_URL` variable is unset load as `None`;
    /// a configured URL with missing credentials is an error.
    pub fn from_env() -> Result<Self, StoreError> {
        let ishalou = VendorSettings::from_env("MDM_ISHALOU")?;
        let android = VendorSettings::from_env("MDM_ANDROID")?;
        let seekdream = VendorSettings::from_env("MDM_SEEKDREAM")?
            .map(|settings| {
                let settings = match read_env("MDM_SEEKDREAM_API_KEY") {
                    Some(key) => settings.with_api_key(key),
                    None => settings,
                };
                match read_env("MDM_SEEKDREAM_SECOND_PASSWORD") {
                    Some(secret) => settings.with_second_password(secret),
                    None => settings,
                }
            });

        Ok(Self {
            ishalou,
            android,
            seekdream,
        })
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn require_env(name: &str) -> Result<String, StoreError> {
    read_env(name).ok_or_else(|| StoreError::MissingEnv(name.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
