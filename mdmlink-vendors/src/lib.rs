// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # mdmlink Vendors
//!
//! Vendor adapter implementations for the mdmlink facade.
//!
//! Each vendor module implements the [`mdmlink_core::Mdm`] contract against
//! its backend's wire format:
//!
//! | Vendor | Family | Auth header | Success marker |
//! |--------|--------|-------------|----------------|
//! | ishalou | Apple | `authorization: <token>` | payload `status == 200` |
//! | headwind | Android | `authorization: Bearer <token>` | payload `status == "OK"` |
//! | seekdream | Android | `token` + `X-API-Key` | payload `"OK"` / HTTP status |
//!
//! The session mechanics the three share — cache-backed one-shot
//! authentication, header injection, the GET/POST rule — live in
//! [`session`]; the [`registry`] dispatches a [`mdmlink_core::DeviceQuery`]
//! to the right adapter by brand.
//!
//! ## Usage
//!
//! ```ignore
//! use mdmlink_core::{Brand, DeviceQuery};
//! use mdmlink_store::{Settings, TokenCache};
//! use mdmlink_vendors::connect;
//!
//! let settings = Settings::from_env()?;
//! let query = DeviceQuery::new(Brand::Apple, "F2LXK", "app-7");
//! let mut mdm = connect(query, &settings, TokenCache::new()).await?;
//! let device = mdm.get_device().await?;
//! ```

pub mod registry;
pub mod session;

// Vendor modules (alphabetical)
pub mod headwind;
pub mod ishalou;
pub mod seekdream;

// Re-export key types
pub use registry::{connect, VendorDescriptor, VendorRegistry};
pub use session::{AuthScheme, AuthState, VendorSession, WireProfile};

// Re-export adapters
pub use headwind::HeadwindMdm;
pub use ishalou::IshalouMdm;
pub use seekdream::SeekdreamMdm;

#[cfg(test)]
mod parser_edge_tests;
