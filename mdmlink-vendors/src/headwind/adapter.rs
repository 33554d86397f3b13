//! headwind adapter.

use async_trait::async_trait;
use serde_json::json;
use tracing::{instrument, warn};

use mdmlink_core::{
    Brand, CommandReceipt, Device, DeviceQuery, Location, Mdm, MdmError, Wallpaper,
};
use mdmlink_store::{TokenCache, VendorSettings};

use crate::session::{http_error, AuthScheme, VendorSession, WireProfile};

use super::api::{
    DeviceSearchRequest, LocationEnvelope, LoginResponse, PushKind, PushRequest, SearchEnvelope,
    StatusEnvelope, DEVICE_SEARCH_ENDPOINT, LOCATION_ENDPOINT, LOGIN_ENDPOINT, MESSAGING_ENDPOINT,
};

/// Token cache key for the headwind backend.
pub const TOKEN_KEY: &str = "androidMDMToken";

/// Adapter for the generic Android MDM backend.
///
/// Most commands ride the vendor's push-message channel addressed by
/// application id; the backend exposes no per-command tracking, so receipts
/// never carry a command id.
#[derive(Debug)]
pub struct HeadwindMdm {
    session: VendorSession,
    query: DeviceQuery,
    username: String,
    password: String,
}

impl HeadwindMdm {
    /// Creates an unauthenticated adapter for `query`.
    pub fn new(query: DeviceQuery, settings: &VendorSettings, cache: TokenCache) -> Self {
        let profile = WireProfile {
            base_url: settings.base_url.clone(),
            token_key: TOKEN_KEY,
            scheme: AuthScheme::Bearer,
            api_key: None,
        };
        Self {
            session: VendorSession::new(profile, cache),
            query,
            username: settings.username.clone(),
            password: settings.password.clone(),
        }
    }

    fn require_brand(&self) -> Result<(), MdmError> {
        if self.query.brand == Brand::Android {
            Ok(())
        } else {
            Err(MdmError::InvalidBrand)
        }
    }

    async fn login(&self) -> Result<String, MdmError> {
        let response = self
            .session
            .http()
            .post(self.session.url(LOGIN_ENDPOINT))
            .json(&json!({ "login": self.username, "password": self.password }))
            .send()
            .await
            .map_err(http_error)?;

        let login: LoginResponse = response.json().await.map_err(http_error)?;
        login
            .id_token
            .ok_or_else(|| MdmError::InvalidResponse("login response carried no id_token".into()))
    }

    /// One push message, `status == "OK"` success marker.
    async fn try_push(&self, kind: PushKind, lock: bool) -> Result<bool, MdmError> {
        let request = PushRequest::new(&self.query.application_id, kind, lock)?;
        let response = self
            .session
            .send(MESSAGING_ENDPOINT, Some(&serde_json::to_value(&request)?))
            .await?;
        let envelope: StatusEnvelope = response.json().await.map_err(http_error)?;
        Ok(envelope.is_ok())
    }

    /// `try_push` with the blanket operational-failure swallow.
    async fn push_or_false(&self, kind: PushKind, lock: bool) -> Result<bool, MdmError> {
        self.require_brand()?;
        match self.try_push(kind, lock).await {
            Ok(acked) => Ok(acked),
            Err(err) => {
                warn!(kind = kind.as_str(), error = %err, "headwind push failed");
                Ok(false)
            }
        }
    }

    /// Toggles ADB access on the device.
    pub async fn set_adb(&self, enabled: bool) -> Result<bool, MdmError> {
        self.push_or_false(PushKind::Adb, enabled).await
    }

    /// Toggles factory-reset protection on the device.
    pub async fn set_factory_reset(&self, enabled: bool) -> Result<bool, MdmError> {
        self.push_or_false(PushKind::Factory, enabled).await
    }

    async fn try_get_device(&self) -> Result<Option<Device>, MdmError> {
        let request = DeviceSearchRequest::for_application(&self.query.application_id);
        let response = self
            .session
            .send(DEVICE_SEARCH_ENDPOINT, Some(&serde_json::to_value(&request)?))
            .await?;
        let envelope: SearchEnvelope = response.json().await.map_err(http_error)?;

        let device = envelope
            .data
            .and_then(|data| data.devices)
            .map(|devices| devices.items)
            .and_then(|items| items.into_iter().next());

        Ok(device.map(super::api::HeadwindDevice::into_canonical))
    }
}

#[async_trait]
impl Mdm for HeadwindMdm {
    fn brand(&self) -> Brand {
        Brand::Android
    }

    fn query(&self) -> &DeviceQuery {
        &self.query
    }

    async fn init(&mut self) -> Result<(), MdmError> {
        if self.session.resume_from_cache() {
            return Ok(());
        }
        match self.login().await {
            Ok(token) => self.session.store_token(token),
            Err(err) => self.session.mark_failed(err.to_string()),
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_device(&mut self) -> Result<Option<Device>, MdmError> {
        self.require_brand()?;
        // Lookup failures are silent here; callers see "not found".
        match self.try_get_device().await {
            Ok(device) => Ok(device),
            Err(_) => Ok(None),
        }
    }

    async fn enable_lost_mode(
        &self,
        _phone_number: &str,
        _content: &str,
    ) -> Result<CommandReceipt, MdmError> {
        // The push channel carries no contact text; the lock message is
        // fixed device-side.
        let acked = self.push_or_false(PushKind::Lock, true).await?;
        Ok(if acked {
            CommandReceipt::accepted(None)
        } else {
            CommandReceipt::rejected()
        })
    }

    async fn disable_lost_mode(&self) -> Result<CommandReceipt, MdmError> {
        let acked = self.push_or_false(PushKind::Lock, false).await?;
        Ok(if acked {
            CommandReceipt::accepted(None)
        } else {
            CommandReceipt::rejected()
        })
    }

    async fn get_locations(&self) -> Result<Vec<Location>, MdmError> {
        let id = self.query.mdm_id.ok_or(MdmError::MdmIdNotFound)?;

        let path = format!("{LOCATION_ENDPOINT}/{id}");
        let response = self.session.send(&path, None).await?;
        let envelope: LocationEnvelope = response.json().await.map_err(http_error)?;
        let data = envelope
            .data
            .ok_or_else(|| MdmError::InvalidResponse("location response carried no data".into()))?;

        Ok(vec![Location {
            device_id: id,
            serial_number: String::new(),
            lng: data.lon,
            lat: data.lat,
        }])
    }

    async fn remove_mdm(&self, _password: Option<&str>) -> Result<bool, MdmError> {
        // Unenroll is modelled as releasing factory-reset protection.
        self.set_factory_reset(false).await
    }

    async fn get_wallpapers(&self) -> Result<Vec<Wallpaper>, MdmError> {
        Err(MdmError::NotImplemented)
    }

    async fn set_wallpaper(
        &self,
        _changeable: bool,
        _wallpaper_id: Option<i64>,
    ) -> Result<bool, MdmError> {
        self.push_or_false(PushKind::Wallpaper, false).await
    }
}

// ============================================================================
// Tests
// ============================================================================
