//! Vendor registry: brand-keyed adapter construction.
//!
//! The registry is a descriptor table, not a branch chain: each descriptor
//! pairs a brand with its settings selector and adapter constructor, and
//! [`connect`] drives authentication to completion before handing the
//! adapter to the caller.

use std::sync::OnceLock;

use mdmlink_core::{Brand, DeviceQuery, Mdm, MdmError};
use mdmlink_store::{Settings, TokenCache, VendorSettings};

use crate::headwind::HeadwindMdm;
use crate::ishalou::IshalouMdm;
use crate::seekdream::SeekdreamMdm;

// ============================================================================
// Descriptors
// ============================================================================

/// Static configuration for one vendor adapter.
pub struct VendorDescriptor {
    /// The brand this descriptor serves.
    pub brand: Brand,
    /// Display name for listings.
    pub display_name: &'static str,
    /// Token cache key the adapter uses.
    pub token_key: &'static str,
    /// Picks this vendor's settings out of the settings set.
    settings: for<'a> fn(&'a Settings) -> Option<&'a VendorSettings>,
    /// Constructs the unauthenticated adapter.
    build: fn(DeviceQuery, &VendorSettings, TokenCache) -> Box<dyn Mdm>,
}

static DESCRIPTORS: OnceLock<Vec<VendorDescriptor>> = OnceLock::new();

fn init_descriptors() -> Vec<VendorDescriptor> {
    vec![
        VendorDescriptor {
            brand: Brand::Apple,
            display_name: "ishalou",
            token_key: crate::ishalou::TOKEN_KEY,
            settings: |settings| settings.ishalou.as_ref(),
            build: |query, settings, cache| Box::new(IshalouMdm::new(query, settings, cache)),
        },
        VendorDescriptor {
            brand: Brand::Android,
            display_name: "headwind",
            token_key: crate::headwind::TOKEN_KEY,
            settings: |settings| settings.android.as_ref(),
            build: |query, settings, cache| Box::new(HeadwindMdm::new(query, settings, cache)),
        },
        VendorDescriptor {
            brand: Brand::AndroidSeekdream,
            display_name: "seekdream",
            token_key: crate::seekdream::TOKEN_KEY,
            settings: |settings| settings.seekdream.as_ref(),
            build: |query, settings, cache| Box::new(SeekdreamMdm::new(query, settings, cache)),
        },
    ]
}

// ============================================================================
// Registry
// ============================================================================

/// Registry of all vendor descriptors.
pub struct VendorRegistry;

impl VendorRegistry {
    /// Returns all vendor descriptors.
    pub fn all() -> &'static [VendorDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets the descriptor for a brand.
    pub fn get(brand: Brand) -> Option<&'static VendorDescriptor> {
        Self::all().iter().find(|d| d.brand == brand)
    }

    /// Returns the number of registered vendors.
    pub fn count() -> usize {
        Self::all().len()
    }
}

/// Builds the adapter for `query` and drives its authentication.
///
/// The returned adapter has settled auth state: either a token (cached or
/// freshly issued) or the fail-open failed state. A brand without
/// configured settings fails with `vendor_not_configured`.
pub async fn connect(
    query: DeviceQuery,
    settings: &Settings,
    cache: TokenCache,
) -> Result<Box<dyn Mdm>, MdmError> {
    let descriptor = VendorRegistry::get(query.brand).ok_or(MdmError::InvalidBrand)?;
    let vendor_settings =
        (descriptor.settings)(settings).ok_or(MdmError::VendorNotConfigured)?;

    let mut adapter = (descriptor.build)(query, vendor_settings, cache);
    adapter.init().await?;
    Ok(adapter)
}

// ============================================================================
// Tests
// ============================================================================
