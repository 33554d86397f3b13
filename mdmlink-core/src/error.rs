//! Contract error type for mdmlink.
//!
//! The display form of each precondition variant is a fixed reason tag
//! (`invalid_brand`, `token_not_found`, ...) that callers can match on.
//! Precondition variants indicate programming errors to fix; the
//! transport/parse variants surface only from the few operations that do
//! not swallow operational failures into neutral values.

use thiserror::Error;

/// Contract error type shared by every vendor adapter.
#[derive(Debug, Error)]
pub enum MdmError {
    /// The query's brand does not match the adapter's vendor.
    #[error("invalid_brand")]
    InvalidBrand,

    /// A request was attempted before any token was established.
    #[error("token_not_found")]
    TokenNotFound,

    /// The operation needs the vendor-internal device id, but the query
    /// has none (the caller skipped `get_device`).
    #[error("mdm_id_not_found")]
    MdmIdNotFound,

    /// The operation needs a merchant identifier, but the query has none.
    #[error("merchant_id_not_found")]
    MerchantIdNotFound,

    /// The vendor has no implementation for this operation.
    #[error("method_not_implemented")]
    NotImplemented,

    /// No settings were configured for the requested vendor.
    #[error("vendor_not_configured")]
    VendorNotConfigured,

    /// HTTP transport failure.
    #[error("http request failed: {0}")]
    Http(String),

    /// The vendor responded with something the adapter cannot interpret.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MdmError {
    /// Returns true for the precondition-violation variants that carry a
    /// fixed reason tag.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidBrand
                | Self::TokenNotFound
                | Self::MdmIdNotFound
                | Self::MerchantIdNotFound
                | Self::NotImplemented
                | Self::VendorNotConfigured
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_tags_are_fixed() {
        assert_eq!(MdmError::InvalidBrand.to_string(), "invalid_brand");
        assert_eq!(MdmError::TokenNotFound.to_string(), "token_not_found");
        assert_eq!(MdmError::MdmIdNotFound.to_string(), "mdm_id_not_found");
        assert_eq!(
            MdmError::MerchantIdNotFound.to_string(),
            "merchant_id_not_found"
        );
        assert_eq!(
            MdmError::NotImplemented.to_string(),
            "method_not_implemented"
        );
        assert_eq!(
            MdmError::VendorNotConfigured.to_string(),
            "vendor_not_configured"
        );
    }

    #[test]
    fn test_precondition_classification() {
        assert!(MdmError::InvalidBrand.is_precondition());
        assert!(MdmError::MdmIdNotFound.is_precondition());
        assert!(!MdmError::Http("refused".into()).is_precondition());
        assert!(!MdmError::InvalidResponse("bad json".into()).is_precondition());
    }
}
