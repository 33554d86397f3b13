//! Trait definition for mdmlink.
//!
//! This module defines the capability contract every vendor adapter must
//! satisfy.

use async_trait::async_trait;

use crate::error::MdmError;
use crate::models::{
    Brand, CommandReceipt, Credit, Device, DeviceDetail, DeviceQuery, Location, Permissions,
    VendorCommand, Wallpaper,
};

/// The capability contract shared by every vendor adapter.
///
/// Callers dispatch through `Box<dyn Mdm>` without vendor-specific branches,
/// so every operation exists on every adapter. Operations a vendor does not
/// support keep the default implementation, which returns the operation's
/// neutral value (`false`, empty list, `None`, zero credit) — or the adapter
/// overrides it to fail with [`MdmError::NotImplemented`]. Either way the
/// method is never silently absent.
///
/// Operational failures (network errors, malformed responses) are swallowed
/// into the neutral value by most operations; `get_locations` and vendors'
/// credit math propagate them. Precondition violations (brand mismatch,
/// missing identifiers) always surface as errors before any network I/O.
///
/// One adapter instance serves one logical caller: `init` and the
/// id-backfilling `get_device` take `&mut self`, and instances are not meant
/// to be shared across tenants.
#[async_trait]
pub trait Mdm: Send + Sync {
    /// The vendor this adapter serves.
    fn brand(&self) -> Brand;

    /// The device query this adapter was built for, including any
    /// vendor-internal id backfilled by `get_device`.
    fn query(&self) -> &DeviceQuery;

    /// Establishes or reuses an auth token.
    ///
    /// Safe to call multiple times; only the first call has effect. A valid
    /// cached token means no login request is issued. A failed login leaves
    /// the adapter in a fail-open state where requests carry an invalid
    /// token and fail at the vendor.
    async fn init(&mut self) -> Result<(), MdmError>;

    /// Locates the one device matching the query's serial/application
    /// identifiers.
    ///
    /// Returns `Ok(None)` when no device matches or on any operational
    /// error — "not found" is never an `Err`.
    async fn get_device(&mut self) -> Result<Option<Device>, MdmError>;

    /// Fetches per-device hardware identifiers.
    async fn get_device_detail(
        &self,
        _device_id: Option<i64>,
    ) -> Result<Option<DeviceDetail>, MdmError> {
        Ok(None)
    }

    /// Fetches the passcode escrow key.
    async fn get_escrow_key(&self) -> Result<Option<String>, MdmError> {
        Ok(None)
    }

    /// Locks the device in lost mode, displaying the given contact number
    /// and message.
    async fn enable_lost_mode(
        &self,
        phone_number: &str,
        content: &str,
    ) -> Result<CommandReceipt, MdmError>;

    /// Releases the lost-mode lock.
    async fn disable_lost_mode(&self) -> Result<CommandReceipt, MdmError>;

    /// Asks the vendor to re-sync the device's newest location.
    async fn refresh_location(&self) -> Result<bool, MdmError> {
        Ok(false)
    }

    /// Most recent known location(s), in vendor-defined order.
    ///
    /// Operational failures propagate here; there is no blanket swallow.
    async fn get_locations(&self) -> Result<Vec<Location>, MdmError>;

    /// Runs the supervision enrollment sequence.
    async fn enable_supervision(&self) -> Result<(), MdmError> {
        Ok(())
    }

    /// Unenrolls the device from management.
    ///
    /// Some vendors require a second factor (`password`); others use a
    /// configured secret or none at all.
    async fn remove_mdm(&self, password: Option<&str>) -> Result<bool, MdmError>;

    /// Clears the device passcode.
    async fn remove_password(&self) -> Result<bool, MdmError> {
        Ok(false)
    }

    /// Hides the management app via the rent-lock channel.
    async fn hide_app(&self) -> Result<CommandReceipt, MdmError> {
        Ok(CommandReceipt::rejected())
    }

    /// Pushes a restriction set to the device.
    async fn set_permissions(&self, _permissions: &Permissions) -> Result<bool, MdmError> {
        Ok(false)
    }

    /// Removes the managed HTTP proxy.
    async fn disable_proxy(&self) -> Result<bool, MdmError> {
        Ok(false)
    }

    /// Installs the managed HTTP proxy.
    async fn enable_proxy(&self) -> Result<bool, MdmError> {
        Ok(false)
    }

    /// Lists wallpapers registered for the device.
    async fn get_wallpapers(&self) -> Result<Vec<Wallpaper>, MdmError> {
        Ok(Vec::new())
    }

    /// Uploads wallpaper image data for the device.
    async fn upload_wallpaper(&self, _wallpaper: &str) -> Result<bool, MdmError> {
        Ok(false)
    }

    /// Pushes the wallpaper and sets whether the user may change it.
    async fn set_wallpaper(
        &self,
        _changeable: bool,
        _wallpaper_id: Option<i64>,
    ) -> Result<bool, MdmError> {
        Ok(false)
    }

    /// Remaining management credit for the operating merchant.
    async fn get_credit(&self) -> Result<Credit, MdmError> {
        Ok(Credit::zero())
    }

    /// Recently issued commands and their execution states, for vendors
    /// that keep a command log. Operational failures propagate here.
    async fn get_operation_history(&self) -> Result<Vec<VendorCommand>, MdmError> {
        Ok(Vec::new())
    }
}
