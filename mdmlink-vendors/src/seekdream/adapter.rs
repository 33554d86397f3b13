//! seekdream adapter.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument, warn};

use mdmlink_core::{
    Brand, CommandReceipt, Device, DeviceQuery, Location, Mdm, MdmError, Wallpaper,
};
use mdmlink_store::{TokenCache, VendorSettings};

use crate::session::{http_error, AuthScheme, VendorSession, WireProfile};

use super::api::{
    CodeEnvelope, DeviceListEnvelope, LocationsEnvelope, LoginResponse, PushWallpaperRequest,
    WallpaperListEnvelope, CLEAR_PASSWORD_ENDPOINT, DEVICE_LIST_ENDPOINT, DISOWN_ENDPOINT,
    LIST_PAGING, LOCATIONS_ENDPOINT, LOCK_ENDPOINT, LOGIN_ENDPOINT, PLAY_SOUND_ENDPOINT,
    PUSH_WALLPAPER_ENDPOINT, REBOOT_ENDPOINT, UNLOCK_ENDPOINT, WALLPAPER_LIST_ENDPOINT,
    WALLPAPER_PAGING,
};
use super::auth::derive_login_secret;

/// Token cache key for the seekdream backend.
pub const TOKEN_KEY: &str = "androidSeekDreamMDMToken";

/// Adapter for the seekdream Android MDM backend.
///
/// Every request carries the static API key next to the session token, and
/// every command is scoped to the query's merchant. Most commands embed a
/// `code == 200` marker; `disown`, `clearPassword`, `pushWallpaper`,
/// `reboot`, and `playSound` signal success through the HTTP status.
#[derive(Debug)]
pub struct SeekdreamMdm {
    session: VendorSession,
    query: DeviceQuery,
    username: String,
    password: String,
    second_password: String,
}

impl SeekdreamMdm {
    /// Creates an unauthenticated adapter for `query`.
    pub fn new(query: DeviceQuery, settings: &VendorSettings, cache: TokenCache) -> Self {
        let profile = WireProfile {
            base_url: settings.base_url.clone(),
            token_key: TOKEN_KEY,
            scheme: AuthScheme::TokenHeader,
            api_key: settings.api_key.clone(),
        };
        Self {
            session: VendorSession::new(profile, cache),
            query,
            username: settings.username.clone(),
            password: settings.password.clone(),
            second_password: settings.second_password().to_string(),
        }
    }

    fn require_brand(&self) -> Result<(), MdmError> {
        if self.query.brand == Brand::AndroidSeekdream {
            Ok(())
        } else {
            Err(MdmError::InvalidBrand)
        }
    }

    fn require_merchant_id(&self) -> Result<&str, MdmError> {
        self.query
            .merchant_id
            .as_deref()
            .ok_or(MdmError::MerchantIdNotFound)
    }

    /// Agent login with the derived password digest. The API key rides the
    /// login request too, before any token exists.
    async fn login(&self) -> Result<String, MdmError> {
        let mut request = self
            .session
            .http()
            .post(self.session.url(LOGIN_ENDPOINT))
            .json(&json!({
                "role": "agent",
                "username": self.username,
                "password": derive_login_secret(&self.password),
            }));
        if let Some(key) = &self.session.profile().api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await.map_err(http_error)?;
        let login: LoginResponse = response.json().await.map_err(http_error)?;
        login
            .token
            .ok_or_else(|| MdmError::InvalidResponse("login response carried no token".into()))
    }

    /// One POST, payload-embedded `code == 200` success marker.
    async fn try_coded(
        &self,
        op: &'static str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<bool, MdmError> {
        let response = self.session.send(path, Some(&body)).await?;
        let envelope: CodeEnvelope = response.json().await.map_err(http_error)?;
        debug!(op, code = ?envelope.code, "seekdream response");
        Ok(envelope.is_ok())
    }

    /// One POST, HTTP-status success marker.
    async fn try_http_acked(
        &self,
        op: &'static str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<bool, MdmError> {
        let response = self.session.send(path, Some(&body)).await?;
        let acked = response.status().is_success();
        debug!(op, acked, "seekdream response");
        Ok(acked)
    }

    /// `try_http_acked` with the blanket operational-failure swallow.
    async fn http_acked_or_false(
        &self,
        op: &'static str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<bool, MdmError> {
        match self.try_http_acked(op, path, body).await {
            Ok(acked) => Ok(acked),
            Err(err) => {
                warn!(op, error = %err, "seekdream command failed");
                Ok(false)
            }
        }
    }

    /// Reboots the device.
    pub async fn reboot(&self) -> Result<bool, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?;
        let body = json!({
            "serial": self.query.serial_number,
            "merchant_id": merchant_id,
        });
        self.http_acked_or_false("reboot", REBOOT_ENDPOINT, body).await
    }

    /// Plays the find-my-device sound.
    pub async fn play_sound(&self) -> Result<bool, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?;
        let body = json!({
            "serial": self.query.serial_number,
            "merchant_id": merchant_id,
        });
        self.http_acked_or_false("play_sound", PLAY_SOUND_ENDPOINT, body)
            .await
    }

    async fn try_get_device(&self) -> Result<Option<Device>, MdmError> {
        let mut params = vec![("serial", self.query.serial_number.as_str())];
        params.extend_from_slice(LIST_PAGING);
        let response = self.session.send_query(DEVICE_LIST_ENDPOINT, &params).await?;
        let envelope: DeviceListEnvelope = response.json().await.map_err(http_error)?;

        let device = envelope
            .data
            .map(|data| data.lists)
            .and_then(|lists| lists.into_iter().next());

        Ok(device.map(super::api::SeekdreamDevice::into_canonical))
    }
}

#[async_trait]
impl Mdm for SeekdreamMdm {
    fn brand(&self) -> Brand {
        Brand::AndroidSeekdream
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
        phone_number: &str,
        content: &str,
    ) -> Result<CommandReceipt, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?;
        let body = json!({
            "serial": self.query.serial_number,
            "merchant_id": merchant_id,
            "phone": phone_number,
            "content": content,
        });
        match self.try_coded("enable_lost_mode", LOCK_ENDPOINT, body).await {
            Ok(true) => Ok(CommandReceipt::accepted(None)),
            Ok(false) => Ok(CommandReceipt::rejected()),
            Err(err) => {
                warn!(error = %err, "seekdream lock failed");
                Ok(CommandReceipt::rejected())
            }
        }
    }

    async fn disable_lost_mode(&self) -> Result<CommandReceipt, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?;
        let body = json!({
            "serial": self.query.serial_number,
            "merchant_id": merchant_id,
        });
        match self
            .try_coded("disable_lost_mode", UNLOCK_ENDPOINT, body)
            .await
        {
            Ok(true) => Ok(CommandReceipt::accepted(None)),
            Ok(false) => Ok(CommandReceipt::rejected()),
            Err(err) => {
                warn!(error = %err, "seekdream unlock failed");
                Ok(CommandReceipt::rejected())
            }
        }
    }

    async fn get_locations(&self) -> Result<Vec<Location>, MdmError> {
        let merchant_id = self.require_merchant_id()?.to_string();

        let mut params = vec![("serial", self.query.serial_number.as_str())];
        params.extend_from_slice(LIST_PAGING);
        params.push(("merchant_id", merchant_id.as_str()));
        let response = self.session.send_query(LOCATIONS_ENDPOINT, &params).await?;
        let envelope: LocationsEnvelope = response.json().await.map_err(http_error)?;

        let records = envelope.data.map(|data| data.list).unwrap_or_default();
        Ok(records
            .into_iter()
            .map(|record| Location {
                device_id: self.query.mdm_id.unwrap_or_default(),
                serial_number: self.query.serial_number.clone(),
                lng: record.location.lng,
                lat: record.location.lat,
            })
            .collect())
    }

    /// Unenroll needs the second factor: the caller's password when given,
    /// the configured one otherwise. Success is the HTTP status.
    async fn remove_mdm(&self, password: Option<&str>) -> Result<bool, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?;
        let body = json!({
            "serial": self.query.serial_number,
            "secondPassword": password.unwrap_or(&self.second_password),
            "merchant_id": merchant_id,
        });
        self.http_acked_or_false("remove_mdm", DISOWN_ENDPOINT, body)
            .await
    }

    async fn remove_password(&self) -> Result<bool, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?;
        let body = json!({
            "serial": self.query.serial_number,
            "merchant_id": merchant_id,
        });
        self.http_acked_or_false("remove_password", CLEAR_PASSWORD_ENDPOINT, body)
            .await
    }

    /// Wallpaper data is hosted vendor-side; uploads are a no-op that
    /// always reports success.
    async fn upload_wallpaper(&self, _wallpaper: &str) -> Result<bool, MdmError> {
        Ok(true)
    }

    async fn get_wallpapers(&self) -> Result<Vec<Wallpaper>, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?.to_string();

        let result: Result<Vec<Wallpaper>, MdmError> = async {
            let mut params: Vec<(&str, &str)> = Vec::new();
            params.extend_from_slice(WALLPAPER_PAGING);
            params.push(("merchant_id", merchant_id.as_str()));
            let response = self
                .session
                .send_query(WALLPAPER_LIST_ENDPOINT, &params)
                .await?;
            let envelope: WallpaperListEnvelope = response.json().await.map_err(http_error)?;
            Ok(envelope
                .data
                .map(|data| data.list)
                .unwrap_or_default()
                .into_iter()
                .map(super::api::WallpaperRow::into_canonical)
                .collect())
        }
        .await;

        match result {
            Ok(wallpapers) => Ok(wallpapers),
            Err(err) => {
                warn!(error = %err, "seekdream wallpaper catalogue failed");
                Ok(Vec::new())
            }
        }
    }

    /// Wallpaper push. Success is the HTTP status, not a payload marker.
    async fn set_wallpaper(
        &self,
        changeable: bool,
        wallpaper_id: Option<i64>,
    ) -> Result<bool, MdmError> {
        self.require_brand()?;
        let merchant_id = self.require_merchant_id()?;
        let request = PushWallpaperRequest {
            serial: &self.query.serial_number,
            wp_type: "3",
            wp_id: wallpaper_id,
            allowed: if changeable { "1" } else { "0" },
            merchant_id,
        };
        let body = serde_json::to_value(&request)?;
        self.http_acked_or_false("set_wallpaper", PUSH_WALLPAPER_ENDPOINT, body)
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================
