// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # mdmlink Store
//!
//! Shared state for the mdmlink facade:
//!
//! - **TokenCache**: process-wide auth-token cache with per-entry TTL,
//!   injected into adapters at construction
//! - **Settings**: per-vendor connection settings read from environment
//!   configuration
//!
//! ## Usage
//!
//! ```ignore
//! use mdmlink_store::{Settings, TokenCache};
//!
//! let cache = TokenCache::new();
//! let settings = Settings::from_env()?;
//! ```

pub mod cache;
pub mod error;
pub mod settings;

pub use cache::TokenCache;
pub use error::StoreError;
pub use settings::{Settings, VendorSettings};
