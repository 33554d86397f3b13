// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # mdmlink Core
//!
//! Core types, models, and the capability contract for mdmlink.
//!
//! This crate provides the foundational abstractions used across the other
//! mdmlink crates:
//!
//! - Canonical vendor-neutral models (devices, locations, permissions)
//! - The contract error type with fixed reason tags
//! - The [`Mdm`] capability contract vendor adapters implement
//!
//! ## Key Types
//!
//! - [`Brand`] - Which vendor backend a query targets
//! - [`DeviceQuery`] - Caller-supplied device identification
//! - [`Device`] / [`DeviceDetail`] - Canonical device records
//! - [`Location`] - Recorded device positions (always numeric coordinates)
//! - [`Permissions`] - Restriction switches (string-boolean wire form)
//! - [`CommandReceipt`] - (accepted, optional vendor command id) pairs
//! - [`MdmError`] - Precondition tags and operational failures

pub mod error;
pub mod models;
pub mod traits;

// Re-export error type
pub use error::MdmError;

// Re-export all model types
pub use models::{
    Brand, CommandReceipt, CommandState, Credit, Device, DeviceDetail, DeviceQuery, DeviceStatus,
    Location, Permissions, VendorCommand, Wallpaper,
};

// Re-export the capability contract
pub use traits::Mdm;
