//! ishalou adapter.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};
use tracing::{debug, instrument, warn};

use mdmlink_core::{
    Brand, CommandReceipt, Credit, Device, DeviceDetail, DeviceQuery, DeviceStatus, Location,
    Mdm, MdmError, Permissions, VendorCommand,
};
use mdmlink_store::{TokenCache, VendorSettings};

use crate::session::{http_error, AuthScheme, VendorSession, WireProfile};

use super::api::{
    BalanceData, CommandData, DeviceDetailData, DeviceQueryRequest, DeviceRows, Envelope,
    EscrowKeyData, LocationRows, LoginEnvelope, OperationLogRows, CLEAR_PASSCODE_ENDPOINT,
    DELETE_PROXY_ENDPOINT, DEVICE_DETAIL_ENDPOINT, DEVICE_QUERY_ENDPOINT, DEVICE_UNLOCK_ENDPOINT,
    ENABLE_PROXY_ENDPOINT, ESCROW_KEY_ENDPOINT, FUNCTION_RESTRICT_ENDPOINT, GET_COMMAND_ENDPOINT,
    LOCATION_QUERY_ENDPOINT, LOCATION_SYNC_ENDPOINT, LOGIN_CODE_ENDPOINT, LOGIN_TOKEN_ENDPOINT,
    MERCHANT_BALANCE_ENDPOINT, MERCHANT_PRICE_ENDPOINT, OPERATION_LOG_ENDPOINT,
    PAY_BALANCE_ENDPOINT, RENEW_REGULATION_ENDPOINT, SET_LOSE_ENDPOINT, SET_RENT_ENDPOINT,
    VERIFY_CONFIRM_ENDPOINT, WALLPAPER_CHANGE_ENDPOINT, WALLPAPER_SAVE_ENDPOINT,
};

/// Token cache key for the ishalou backend.
pub const TOKEN_KEY: &str = "appleMDMToken";

/// Adapter for the ishalou Apple MDM backend.
///
/// `get_device` performs follow-up commands when it finds a device
/// unsupervised or proxy-enabled, and reports the expected post-command
/// state on the returned record without re-querying. That state is
/// predicted, not confirmed: a silently failed follow-up leaves the record
/// ahead of the vendor's reality.
#[derive(Debug)]
pub struct IshalouMdm {
    session: VendorSession,
    query: DeviceQuery,
    username: String,
    password: String,
}

impl IshalouMdm {
    /// Creates an unauthenticated adapter for `query`.
    pub fn new(query: DeviceQuery, settings: &VendorSettings, cache: TokenCache) -> Self {
        let profile = WireProfile {
            base_url: settings.base_url.clone(),
            token_key: TOKEN_KEY,
            scheme: AuthScheme::Raw,
            api_key: None,
        };
        Self {
            session: VendorSession::new(profile, cache),
            query,
            username: settings.username.clone(),
            password: settings.password.clone(),
        }
    }

    fn require_mdm_id(&self) -> Result<i64, MdmError> {
        self.query.mdm_id.ok_or(MdmError::MdmIdNotFound)
    }

    /// Mobile-code login: request a code for the account, then exchange the
    /// configured code for a session token.
    async fn login(&self) -> Result<String, MdmError> {
        let code_url = format!(
            "{}?type=1&mobile={}",
            self.session.url(LOGIN_CODE_ENDPOINT),
            self.username
        );
        self.session
            .http()
            .get(&code_url)
            .send()
            .await
            .map_err(http_error)?;

        let response = self
            .session
            .http()
            .post(self.session.url(LOGIN_TOKEN_ENDPOINT))
            .json(&json!({ "mobile": self.username, "code": self.password }))
            .send()
            .await
            .map_err(http_error)?;

        let envelope: LoginEnvelope = response.json().await.map_err(http_error)?;
        envelope
            .data
            .ok_or_else(|| MdmError::InvalidResponse("login response carried no token".into()))
    }

    /// One POST, payload-embedded `status == 200` success marker.
    async fn try_ack(&self, op: &'static str, path: &str, body: Value) -> Result<bool, MdmError> {
        let response = self.session.send(path, Some(&body)).await?;
        let envelope: Envelope<Value> = response.json().await.map_err(http_error)?;
        debug!(op, status = ?envelope.status, "ishalou response");
        Ok(envelope.is_ok())
    }

    /// `try_ack` with the blanket operational-failure swallow.
    async fn ack_or_false(
        &self,
        op: &'static str,
        path: &str,
        body: Value,
    ) -> Result<bool, MdmError> {
        match self.try_ack(op, path, body).await {
            Ok(acked) => Ok(acked),
            Err(err) => {
                warn!(op, error = %err, "ishalou command failed");
                Ok(false)
            }
        }
    }

    async fn try_get_device(&mut self) -> Result<Option<Device>, MdmError> {
        let request = DeviceQueryRequest::for_query(&self.query);
        let response = self
            .session
            .send(DEVICE_QUERY_ENDPOINT, Some(&serde_json::to_value(&request)?))
            .await?;
        let envelope: Envelope<DeviceRows> = response.json().await.map_err(http_error)?;

        let Some(mut device) = envelope
            .data
            .map(|rows| rows.rows)
            .and_then(|rows| rows.into_iter().next())
        else {
            return Ok(None);
        };

        self.query.mdm_id = Some(device.id);

        if device.device_status == DeviceStatus::Unregulated {
            self.enable_supervision().await?;
            device.device_status = DeviceStatus::Supervised;
        }

        if device.http_proxy_status == 1 {
            self.disable_proxy().await?;
            device.http_proxy_status = 0;
        }

        Ok(Some(device))
    }

    async fn try_enable_supervision(&self, id: i64) -> Result<(), MdmError> {
        self.session
            .send(VERIFY_CONFIRM_ENDPOINT, Some(&json!({ "deviceList": [id] })))
            .await?;
        sleep(Duration::from_secs(1)).await;
        self.session
            .send(PAY_BALANCE_ENDPOINT, Some(&json!({ "deviceList": [id] })))
            .await?;
        sleep(Duration::from_secs(3)).await;
        self.set_permissions(&Permissions::supervision_defaults())
            .await?;
        Ok(())
    }

    /// One command-tracked POST: success marker plus the optional command
    /// id the backend assigned.
    async fn try_tracked(
        &self,
        op: &'static str,
        path: &str,
        body: Value,
    ) -> Result<CommandReceipt, MdmError> {
        let response = self.session.send(path, Some(&body)).await?;
        let envelope: Envelope<CommandData> = response.json().await.map_err(http_error)?;
        debug!(op, status = ?envelope.status, "ishalou response");
        if envelope.is_ok() {
            let command_id = envelope.data.and_then(|data| data.command_id);
            Ok(CommandReceipt::accepted(command_id))
        } else {
            Ok(CommandReceipt::rejected())
        }
    }

    /// Looks up one tracked command; a non-success response collapses to
    /// the abandoned placeholder.
    async fn get_command(&self, command_id: i64) -> Result<VendorCommand, MdmError> {
        let response = self
            .session
            .send(GET_COMMAND_ENDPOINT, Some(&json!({ "id": command_id })))
            .await?;
        let envelope: Envelope<VendorCommand> = response.json().await.map_err(http_error)?;
        if !envelope.is_ok() {
            return Ok(VendorCommand::abandoned(command_id));
        }
        envelope
            .data
            .ok_or_else(|| MdmError::InvalidResponse("command response carried no data".into()))
    }
}

#[async_trait]
impl Mdm for IshalouMdm {
    fn brand(&self) -> Brand {
        Brand::Apple
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
        if self.query.brand != Brand::Apple {
            return Err(MdmError::InvalidBrand);
        }
        match self.try_get_device().await {
            Ok(device) => Ok(device),
            Err(err) => {
                warn!(error = %err, "ishalou device lookup failed");
                Ok(None)
            }
        }
    }

    async fn get_device_detail(
        &self,
        device_id: Option<i64>,
    ) -> Result<Option<DeviceDetail>, MdmError> {
        let id = match device_id {
            Some(id) => id,
            None => self.require_mdm_id()?,
        };

        let result: Result<Option<DeviceDetail>, MdmError> = async {
            let response = self
                .session
                .send(DEVICE_DETAIL_ENDPOINT, Some(&json!({ "deviceId": id })))
                .await?;
            let envelope: Envelope<DeviceDetailData> =
                response.json().await.map_err(http_error)?;
            Ok(envelope.data)
        }
        .await;

        match result {
            Ok(detail) => Ok(detail),
            Err(err) => {
                warn!(error = %err, "ishalou device detail failed");
                Ok(None)
            }
        }
    }

    async fn get_escrow_key(&self) -> Result<Option<String>, MdmError> {
        let id = self.require_mdm_id()?;

        let result: Result<Option<String>, MdmError> = async {
            let response = self
                .session
                .send(ESCROW_KEY_ENDPOINT, Some(&json!({ "id": id })))
                .await?;
            let envelope: Envelope<EscrowKeyData> = response.json().await.map_err(http_error)?;
            Ok(envelope.data.and_then(|data| data.escrow_key))
        }
        .await;

        match result {
            Ok(key) => Ok(key),
            Err(err) => {
                warn!(error = %err, "ishalou escrow key lookup failed");
                Ok(None)
            }
        }
    }

    async fn enable_lost_mode(
        &self,
        phone_number: &str,
        content: &str,
    ) -> Result<CommandReceipt, MdmError> {
        let id = self.require_mdm_id()?;
        let body = json!({
            "losePhone": phone_number,
            "loseContent": content,
            "id": id,
        });
        match self.try_tracked("enable_lost_mode", SET_LOSE_ENDPOINT, body).await {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                warn!(error = %err, "ishalou lost-mode enable failed");
                Ok(CommandReceipt::rejected())
            }
        }
    }

    async fn disable_lost_mode(&self) -> Result<CommandReceipt, MdmError> {
        let id = self.require_mdm_id()?;
        match self
            .try_tracked(
                "disable_lost_mode",
                RENEW_REGULATION_ENDPOINT,
                json!({ "id": id }),
            )
            .await
        {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                warn!(error = %err, "ishalou lost-mode disable failed");
                Ok(CommandReceipt::rejected())
            }
        }
    }

    async fn refresh_location(&self) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;
        self.ack_or_false(
            "refresh_location",
            LOCATION_SYNC_ENDPOINT,
            json!({ "deviceId": id }),
        )
        .await
    }

    async fn get_locations(&self) -> Result<Vec<Location>, MdmError> {
        let id = self.require_mdm_id()?;
        let body = json!({ "limit": 10, "page": 1, "deviceId": id });
        let response = self.session.send(LOCATION_QUERY_ENDPOINT, Some(&body)).await?;
        let envelope: Envelope<LocationRows> = response.json().await.map_err(http_error)?;
        Ok(envelope.data.map(|rows| rows.rows).unwrap_or_default())
    }

    async fn enable_supervision(&self) -> Result<(), MdmError> {
        let id = self.require_mdm_id()?;
        if let Err(err) = self.try_enable_supervision(id).await {
            warn!(error = %err, "ishalou supervision sequence failed");
        }
        Ok(())
    }

    /// Success here means the unlock request went through and parsed; the
    /// backend reports no per-request marker for it.
    async fn remove_mdm(&self, _password: Option<&str>) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;

        let result: Result<bool, MdmError> = async {
            let response = self
                .session
                .send(DEVICE_UNLOCK_ENDPOINT, Some(&json!({ "id": id })))
                .await?;
            let body: Value = response.json().await.map_err(http_error)?;
            debug!(?body, "ishalou unlock response");
            Ok(true)
        }
        .await;

        match result {
            Ok(acked) => Ok(acked),
            Err(err) => {
                warn!(error = %err, "ishalou unenroll failed");
                Ok(false)
            }
        }
    }

    async fn remove_password(&self) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;
        self.ack_or_false(
            "remove_password",
            CLEAR_PASSCODE_ENDPOINT,
            json!({ "id": id }),
        )
        .await
    }

    async fn hide_app(&self) -> Result<CommandReceipt, MdmError> {
        let id = self.require_mdm_id()?;
        let body = json!({ "id": id, "rentIdentifierId": 81 });
        match self.try_tracked("hide_app", SET_RENT_ENDPOINT, body).await {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                warn!(error = %err, "ishalou rent lock failed");
                Ok(CommandReceipt::rejected())
            }
        }
    }

    async fn set_permissions(&self, permissions: &Permissions) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;

        let result: Result<bool, MdmError> = async {
            let body = json!({
                "id": id,
                "functionRestrictData": serde_json::to_string(permissions)?,
            });
            self.try_ack("set_permissions", FUNCTION_RESTRICT_ENDPOINT, body)
                .await
        }
        .await;

        match result {
            Ok(acked) => Ok(acked),
            Err(err) => {
                warn!(error = %err, "ishalou restriction push failed");
                Ok(false)
            }
        }
    }

    async fn disable_proxy(&self) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;
        self.ack_or_false("disable_proxy", DELETE_PROXY_ENDPOINT, json!({ "id": id }))
            .await
    }

    async fn enable_proxy(&self) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;
        self.ack_or_false("enable_proxy", ENABLE_PROXY_ENDPOINT, json!({ "id": id }))
            .await
    }

    async fn upload_wallpaper(&self, wallpaper: &str) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;
        self.ack_or_false(
            "upload_wallpaper",
            WALLPAPER_SAVE_ENDPOINT,
            json!({ "deviceId": id, "wallpager": wallpaper }),
        )
        .await
    }

    async fn set_wallpaper(
        &self,
        changeable: bool,
        _wallpaper_id: Option<i64>,
    ) -> Result<bool, MdmError> {
        let id = self.require_mdm_id()?;
        self.ack_or_false(
            "set_wallpaper",
            WALLPAPER_CHANGE_ENDPOINT,
            json!({ "deviceId": id, "wallgerStatus": changeable }),
        )
        .await
    }

    /// Credit is the merchant's recharge balance divided by the per-device
    /// management price. Failures propagate; there is no blanket swallow
    /// on this path.
    async fn get_credit(&self) -> Result<Credit, MdmError> {
        let response = self.session.send(MERCHANT_PRICE_ENDPOINT, Some(&json!({}))).await?;
        let price: Envelope<f64> = response.json().await.map_err(http_error)?;
        let price = price
            .data
            .ok_or_else(|| MdmError::InvalidResponse("price response carried no data".into()))?;
        if price == 0.0 {
            return Err(MdmError::InvalidResponse("zero management unit price".into()));
        }

        let response = self
            .session
            .send(MERCHANT_BALANCE_ENDPOINT, Some(&json!({})))
            .await?;
        let balance: Envelope<BalanceData> = response.json().await.map_err(http_error)?;
        let balance = balance
            .data
            .ok_or_else(|| MdmError::InvalidResponse("balance response carried no data".into()))?;

        Ok(Credit {
            credit: balance.recharge_balance / price,
        })
    }

    /// Walks the device operation log and resolves every tracked command.
    /// Failures propagate; there is no blanket swallow on this path.
    async fn get_operation_history(&self) -> Result<Vec<VendorCommand>, MdmError> {
        let id = self.require_mdm_id()?;
        let body = json!({ "limit": 10, "page": 1, "deviceId": id });
        let response = self.session.send(OPERATION_LOG_ENDPOINT, Some(&body)).await?;
        let envelope: Envelope<OperationLogRows> = response.json().await.map_err(http_error)?;

        let rows = envelope.data.map(|rows| rows.rows).unwrap_or_default();
        let mut commands = Vec::new();
        for row in rows {
            let Some(command_id) = row.command_id else {
                continue;
            };
            commands.push(self.get_command(command_id).await?);
        }
        Ok(commands)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthState;

    fn unroutable_settings() -> VendorSettings {
        VendorSettings::new("http://127.0.0.1:1", "13800000000", "code")
    }

    fn adapter_with(query: DeviceQuery, cache: TokenCache) -> IshalouMdm {
        IshalouMdm::new(query, &unroutable_settings(), cache)
    }

    #[tokio::test]
    async fn test_init_reuses_cached_token_without_login() {
        let cache = TokenCache::new();
        cache.set(TOKEN_KEY, "cached-token", crate::session::TOKEN_TTL);

        let query = DeviceQuery::new(Brand::Apple, "SER", "app");
        let mut adapter = adapter_with(query, cache);

        // The endpoint is unroutable, so reaching the network would settle
        // the session as Failed. A cache hit must settle it Authenticated.
        adapter.init().await.unwrap();
        assert_eq!(
            adapter.session.state(),
            &AuthState::Authenticated("cached-token".into())
        );
    }

    #[tokio::test]
    async fn test_init_is_idempotent_after_failure() {
        let query = DeviceQuery::new(Brand::Apple, "SER", "app");
        let mut adapter = adapter_with(query, TokenCache::new());

        adapter.init().await.unwrap();
        let state = adapter.session.state().clone();
        assert!(matches!(state, AuthState::Failed(_)));

        // Second init must be a no-op, not a second login attempt.
        adapter.init().await.unwrap();
        assert_eq!(adapter.session.state(), &state);
    }

    #[tokio::test]
    async fn test_get_device_rejects_brand_mismatch_before_network() {
        let query = DeviceQuery::new(Brand::Android, "SER", "app");
        let mut adapter = adapter_with(query, TokenCache::new());

        // No init: a network attempt would surface as token_not_found or a
        // swallowed lookup. The brand check must win first.
        let err = adapter.get_device().await.unwrap_err();
        assert_eq!(err.to_string(), "invalid_brand");
    }

    #[tokio::test]
    async fn test_operations_require_mdm_id() {
        let query = DeviceQuery::new(Brand::Apple, "SER", "app");
        let adapter = adapter_with(query, TokenCache::new());

        let err = adapter.enable_lost_mode("1", "lost").await.unwrap_err();
        assert_eq!(err.to_string(), "mdm_id_not_found");
        let err = adapter.get_locations().await.unwrap_err();
        assert_eq!(err.to_string(), "mdm_id_not_found");
        let err = adapter.remove_password().await.unwrap_err();
        assert_eq!(err.to_string(), "mdm_id_not_found");
        let err = adapter.get_operation_history().await.unwrap_err();
        assert_eq!(err.to_string(), "mdm_id_not_found");
    }

    #[tokio::test]
    async fn test_lost_mode_swallows_transport_failure() {
        let cache = TokenCache::new();
        cache.set(TOKEN_KEY, "tok", crate::session::TOKEN_TTL);

        let query = DeviceQuery::new(Brand::Apple, "SER", "app").with_mdm_id(5);
        let mut adapter = adapter_with(query, cache);
        adapter.init().await.unwrap();

        // Unroutable vendor: the request rejects, the method must not.
        let receipt = adapter.enable_lost_mode("1", "lost").await.unwrap();
        assert_eq!(receipt, CommandReceipt::rejected());
    }

    #[tokio::test]
    async fn test_hide_app_swallows_transport_failure() {
        let cache = TokenCache::new();
        cache.set(TOKEN_KEY, "tok", crate::session::TOKEN_TTL);

        let query = DeviceQuery::new(Brand::Apple, "SER", "app").with_mdm_id(5);
        let mut adapter = adapter_with(query, cache);
        adapter.init().await.unwrap();

        let receipt = adapter.hide_app().await.unwrap();
        assert_eq!(receipt, CommandReceipt::rejected());
    }

    #[tokio::test]
    async fn test_get_locations_propagates_transport_failure() {
        let cache = TokenCache::new();
        cache.set(TOKEN_KEY, "tok", crate::session::TOKEN_TTL);

        let query = DeviceQuery::new(Brand::Apple, "SER", "app").with_mdm_id(5);
        let mut adapter = adapter_with(query, cache);
        adapter.init().await.unwrap();

        assert!(adapter.get_locations().await.is_err());
    }

    #[tokio::test]
    async fn test_unauthenticated_send_is_a_precondition_error() {
        // mdm id present but no init: the missing token is the programming
        // error surfaced, wrapped by the blanket swallow into the neutral
        // value for swallowing methods and propagated by the rest.
        let query = DeviceQuery::new(Brand::Apple, "SER", "app").with_mdm_id(5);
        let adapter = adapter_with(query, TokenCache::new());

        let err = adapter.get_locations().await.unwrap_err();
        assert_eq!(err.to_string(), "token_not_found");
    }
}
